use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookstore_db::Store;
use bookstore_http::error::{AppError, AppResult};

use super::models::{Author, AuthorInput};
use super::repo::AuthorRepo;
use crate::utils;

/// Routes relative to the `/authors` mount point
pub fn router() -> Router<Store> {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route(
            "/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
}

/// GET /authors
async fn list_authors(State(store): State<Store>) -> AppResult<Json<Vec<Author>>> {
    let authors = AuthorRepo::new(&store).list().await?;
    Ok(Json(authors))
}

/// GET /authors/{id}
async fn get_author(State(store): State<Store>, Path(id): Path<i64>) -> AppResult<Json<Author>> {
    AuthorRepo::new(&store)
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("author {id}")))
}

/// POST /authors
async fn create_author(
    State(store): State<Store>,
    Json(input): Json<AuthorInput>,
) -> AppResult<impl IntoResponse> {
    let author = AuthorRepo::new(&store).add(&input).await?;
    tracing::debug!(author_id = author.id, "author created");

    let location = utils::location(super::MODULE_NAME, author.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(author)))
}

/// PUT /authors/{id}
async fn update_author(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(input): Json<AuthorInput>,
) -> AppResult<Json<Author>> {
    let author = AuthorRepo::new(&store)
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("author {id}")))?;

    tracing::debug!(author_id = author.id, "author updated");
    Ok(Json(author))
}

/// DELETE /authors/{id}
///
/// Answers 204 whether or not the author existed.
async fn delete_author(State(store): State<Store>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let removed = AuthorRepo::new(&store).remove(id).await?;
    tracing::debug!(author_id = id, removed, "author delete");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_get() {
        let app = app().await;

        let created = send(&app, "POST", "/authors", Some(json!({"name": "Orwell"}))).await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.location.as_deref(), Some("/authors/1"));
        assert_eq!(created.body, json!({"id": 1, "name": "Orwell"}));

        let fetched = send(&app, "GET", "/authors/1", None).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, created.body);
    }

    #[tokio::test]
    async fn client_supplied_id_is_ignored() {
        let app = app().await;

        let created = send(&app, "POST", "/authors", Some(json!({"id": 99, "name": "Le Guin"}))).await;
        assert_eq!(created.body["id"], 1);

        let missing = send(&app, "GET", "/authors/99", None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_all_authors() {
        let app = app().await;
        send(&app, "POST", "/authors", Some(json!({"name": "Orwell"}))).await;
        send(&app, "POST", "/authors", Some(json!({"name": "Huxley"}))).await;

        let listed = send(&app, "GET", "/authors", None).await;
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(
            listed.body,
            json!([{"id": 1, "name": "Orwell"}, {"id": 2, "name": "Huxley"}])
        );
    }

    #[tokio::test]
    async fn update_overwrites_name_only() {
        let app = app().await;
        send(&app, "POST", "/authors", Some(json!({"name": "Orwel"}))).await;

        let updated = send(&app, "PUT", "/authors/1", Some(json!({"id": 5, "name": "Orwell"}))).await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body, json!({"id": 1, "name": "Orwell"}));

        let fetched = send(&app, "GET", "/authors/1", None).await;
        assert_eq!(fetched.body["name"], "Orwell");
    }

    #[tokio::test]
    async fn update_of_absent_id_is_404() {
        let app = app().await;
        let updated = send(&app, "PUT", "/authors/3", Some(json!({"name": "Nobody"}))).await;
        assert_eq!(updated.status, StatusCode::NOT_FOUND);
        assert!(updated.body.is_null());
    }

    #[tokio::test]
    async fn delete_is_204_whether_or_not_present() {
        let app = app().await;
        send(&app, "POST", "/authors", Some(json!({"name": "Orwell"}))).await;

        assert_eq!(send(&app, "DELETE", "/authors/1", None).await.status, StatusCode::NO_CONTENT);
        assert_eq!(send(&app, "GET", "/authors/1", None).await.status, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, "DELETE", "/authors/1", None).await.status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let app = app().await;
        send(&app, "POST", "/authors", Some(json!({"name": "First"}))).await;
        send(&app, "DELETE", "/authors/1", None).await;

        let created = send(&app, "POST", "/authors", Some(json!({"name": "Second"}))).await;
        assert_eq!(created.body["id"], 2);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_before_the_handler() {
        let app = app().await;
        let created = send(&app, "POST", "/authors", Some(json!({"title": "no name"}))).await;
        assert!(created.status.is_client_error());

        let listed = send(&app, "GET", "/authors", None).await;
        assert_eq!(listed.body, json!([]));
    }
}
