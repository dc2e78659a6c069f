use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Create/update body; a client-sent `id` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryInput {
    pub name: String,
}
