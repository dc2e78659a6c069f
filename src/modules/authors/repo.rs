use bookstore_db::{DbResult, Store};
use sqlx::SqlitePool;

use super::models::{Author, AuthorInput};

/// Author repository
pub struct AuthorRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AuthorRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { pool: store.pool() }
    }

    pub async fn list(&self) -> DbResult<Vec<Author>> {
        let authors: Vec<Author> = sqlx::query_as("SELECT id, name FROM authors ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(authors)
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Author>> {
        let author: Option<Author> = sqlx::query_as("SELECT id, name FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(author)
    }

    /// Insert a new author; the id comes from storage.
    pub async fn add(&self, input: &AuthorInput) -> DbResult<Author> {
        let id = sqlx::query("INSERT INTO authors (name) VALUES (?)")
            .bind(&input.name)
            .execute(self.pool)
            .await?
            .last_insert_rowid();

        Ok(Author {
            id,
            name: input.name.clone(),
        })
    }

    /// Overwrite the name of an existing author.
    ///
    /// Returns `None` when the id is absent. A single write statement, so
    /// concurrent updates queue on the write lock instead of failing.
    pub async fn update(&self, id: i64, input: &AuthorInput) -> DbResult<Option<Author>> {
        let author: Option<Author> =
            sqlx::query_as("UPDATE authors SET name = ? WHERE id = ? RETURNING id, name")
                .bind(&input.name)
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(author)
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn remove(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
