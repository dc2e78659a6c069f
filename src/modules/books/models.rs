use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::modules::authors::models::Author;
use crate::modules::categories::models::Category;

/// A book with its author and category resolved from the current rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Storage-assigned identifier
    pub id: i64,
    /// Title of the book
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Foreign key into `authors`
    pub author_id: Option<i64>,
    /// Foreign key into `categories`
    pub category_id: Option<i64>,
    /// Author referenced by `authorId`, resolved at read time
    pub author: Option<Author>,
    /// Category referenced by `categoryId`, resolved at read time
    pub category: Option<Category>,
}

/// Request body for creating or updating a book.
///
/// Every field here is overwritten on update; an `id` sent by the client is
/// ignored, as are nested `author`/`category` objects.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// One `books` row joined with its author and category names.
#[derive(Debug, FromRow)]
pub(crate) struct BookRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
    pub author_ref: Option<i64>,
    pub author_name: Option<String>,
    pub category_ref: Option<i64>,
    pub category_name: Option<String>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let author = row
            .author_ref
            .zip(row.author_name)
            .map(|(id, name)| Author { id, name });
        let category = row
            .category_ref
            .zip(row.category_name)
            .map(|(id, name)| Category { id, name });

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            author_id: row.author_id,
            category_id: row.category_id,
            author,
            category,
        }
    }
}
