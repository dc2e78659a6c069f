use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Author row as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    /// Storage-assigned identifier
    pub id: i64,
    /// Display name of the author
    pub name: String,
}

/// Request body for creating or updating an author.
///
/// An `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorInput {
    /// Display name of the author
    pub name: String,
}
