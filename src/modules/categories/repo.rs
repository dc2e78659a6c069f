use bookstore_db::{DbResult, Store};
use sqlx::SqlitePool;

use super::models::{Category, CategoryInput};

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { pool: store.pool() }
    }

    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories: Vec<Category> = sqlx::query_as("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Category>> {
        let category: Option<Category> = sqlx::query_as("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(category)
    }

    pub async fn add(&self, input: &CategoryInput) -> DbResult<Category> {
        let id = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(&input.name)
            .execute(self.pool)
            .await?
            .last_insert_rowid();

        Ok(Category {
            id,
            name: input.name.clone(),
        })
    }

    /// `None` when the id is absent.
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Option<Category>> {
        let category: Option<Category> =
            sqlx::query_as("UPDATE categories SET name = ? WHERE id = ? RETURNING id, name")
                .bind(&input.name)
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(category)
    }

    pub async fn remove(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
