use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookstore_db::Store;
use bookstore_http::error::{AppError, AppResult};

use super::models::{Book, BookInput};
use super::repo::BookRepo;
use crate::utils;

/// Routes relative to the `/books` mount point
pub fn router() -> Router<Store> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
}

/// GET /books - every book with author and category resolved
async fn list_books(State(store): State<Store>) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::new(&store).list().await?;
    Ok(Json(books))
}

/// GET /books/{id}
async fn get_book(State(store): State<Store>, Path(id): Path<i64>) -> AppResult<Json<Book>> {
    let book = BookRepo::new(&store)
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("book {id}")))?;
    Ok(Json(book))
}

/// POST /books
async fn create_book(
    State(store): State<Store>,
    Json(input): Json<BookInput>,
) -> AppResult<impl IntoResponse> {
    let book = BookRepo::new(&store).add(&input).await?;
    tracing::debug!(
        book_id = book.id,
        author_id = ?book.author_id,
        category_id = ?book.category_id,
        "book created"
    );

    let location = utils::location(super::MODULE_NAME, book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// PUT /books/{id}
async fn update_book(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(input): Json<BookInput>,
) -> AppResult<Json<Book>> {
    let book = BookRepo::new(&store)
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("book {id}")))?;

    tracing::debug!(book_id = book.id, "book updated");
    Ok(Json(book))
}

/// DELETE /books/{id}
///
/// 204 whether or not the book existed; callers cannot tell the two apart.
async fn delete_book(State(store): State<Store>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let removed = BookRepo::new(&store).remove(id).await?;
    tracing::debug!(book_id = id, removed, "book delete");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, send};
    use axum::http::StatusCode;
    use axum::Router;
    use serde_json::json;

    async fn seed(app: &Router) {
        send(app, "POST", "/authors", Some(json!({"name": "Orwell"}))).await;
        send(app, "POST", "/authors", Some(json!({"name": "Huxley"}))).await;
        send(app, "POST", "/categories", Some(json!({"name": "Fiction"}))).await;
        send(app, "POST", "/categories", Some(json!({"name": "Dystopia"}))).await;
    }

    #[tokio::test]
    async fn create_returns_resolved_book_and_location() {
        let app = app().await;
        seed(&app).await;

        let created = send(
            &app,
            "POST",
            "/books",
            Some(json!({"title": "1984", "description": "Big Brother", "authorId": 1, "categoryId": 1})),
        )
        .await;

        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.location.as_deref(), Some("/books/1"));
        assert_eq!(
            created.body,
            json!({
                "id": 1,
                "title": "1984",
                "description": "Big Brother",
                "authorId": 1,
                "categoryId": 1,
                "author": {"id": 1, "name": "Orwell"},
                "category": {"id": 1, "name": "Fiction"}
            })
        );

        let fetched = send(&app, "GET", "/books/1", None).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, created.body);
    }

    #[tokio::test]
    async fn list_resolves_current_rows() {
        let app = app().await;
        seed(&app).await;
        send(&app, "POST", "/books", Some(json!({"title": "1984", "authorId": 1, "categoryId": 1}))).await;
        send(&app, "POST", "/books", Some(json!({"title": "Brave New World", "authorId": 2, "categoryId": 2}))).await;

        // Renaming the author must show up on the next read of the book
        send(&app, "PUT", "/authors/1", Some(json!({"name": "George Orwell"}))).await;

        let listed = send(&app, "GET", "/books", None).await;
        assert_eq!(listed.status, StatusCode::OK);
        let books = listed.body.as_array().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0]["author"]["name"], "George Orwell");
        assert_eq!(books[0]["category"]["name"], "Fiction");
        assert_eq!(books[1]["author"]["name"], "Huxley");
        assert_eq!(books[1]["category"]["name"], "Dystopia");
    }

    #[tokio::test]
    async fn update_relinks_author_and_category() {
        let app = app().await;
        seed(&app).await;
        send(&app, "POST", "/books", Some(json!({"title": "1984", "authorId": 1, "categoryId": 1}))).await;

        let updated = send(
            &app,
            "PUT",
            "/books/1",
            Some(json!({"id": 7, "title": "Brave New World", "authorId": 2, "categoryId": 2})),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["id"], 1);

        let fetched = send(&app, "GET", "/books/1", None).await;
        assert_eq!(fetched.body["title"], "Brave New World");
        assert_eq!(fetched.body["author"], json!({"id": 2, "name": "Huxley"}));
        assert_eq!(fetched.body["category"], json!({"id": 2, "name": "Dystopia"}));
    }

    #[tokio::test]
    async fn update_of_absent_book_is_404() {
        let app = app().await;
        let updated = send(&app, "PUT", "/books/5", Some(json!({"title": "Nothing"}))).await;
        assert_eq!(updated.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn book_without_links_has_null_references() {
        let app = app().await;
        let created = send(&app, "POST", "/books", Some(json!({"title": "Anonymous"}))).await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert!(created.body["author"].is_null());
        assert!(created.body["category"].is_null());
    }

    #[tokio::test]
    async fn dangling_author_is_a_server_error() {
        let app = app().await;
        let created = send(&app, "POST", "/books", Some(json!({"title": "Ghost", "authorId": 99}))).await;
        assert_eq!(created.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(created.body["error"]["code"], "internal_error");
    }

    #[tokio::test]
    async fn deleted_book_is_gone_and_delete_stays_204() {
        let app = app().await;
        send(&app, "POST", "/books", Some(json!({"title": "1984"}))).await;

        assert_eq!(send(&app, "DELETE", "/books/1", None).await.status, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, "GET", "/books/1", None).await.status, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, "DELETE", "/books/1", None).await.status, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, "DELETE", "/books/404", None).await.status, StatusCode::NO_CONTENT);
    }
}
