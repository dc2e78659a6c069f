use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookstore_db::Store;
use bookstore_http::error::{AppError, AppResult};

use super::models::{Category, CategoryInput};
use super::repo::CategoryRepo;
use crate::utils;

/// Routes relative to the `/categories` mount point
pub fn router() -> Router<Store> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// GET /categories
async fn list_categories(State(store): State<Store>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::new(&store).list().await?;
    Ok(Json(categories))
}

/// GET /categories/{id}
async fn get_category(State(store): State<Store>, Path(id): Path<i64>) -> AppResult<Json<Category>> {
    CategoryRepo::new(&store)
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("category {id}")))
}

/// POST /categories
async fn create_category(
    State(store): State<Store>,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::new(&store).add(&input).await?;
    tracing::debug!(category_id = category.id, "category created");

    let location = utils::location(super::MODULE_NAME, category.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(category)))
}

/// PUT /categories/{id}
async fn update_category(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::new(&store)
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {id}")))?;

    tracing::debug!(category_id = category.id, "category updated");
    Ok(Json(category))
}

/// DELETE /categories/{id}
///
/// Answers 204 whether or not the category existed.
async fn delete_category(State(store): State<Store>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let removed = CategoryRepo::new(&store).remove(id).await?;
    tracing::debug!(category_id = id, removed, "category delete");
    Ok(StatusCode::NO_CONTENT)
}
