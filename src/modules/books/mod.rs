pub mod models;
pub mod repo;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Migration, Module, Store};

use crate::modules::{authors, categories};
use crate::utils;

pub(crate) const MODULE_NAME: &str = "books";

/// Books collection, linked to one author and one category each
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router<Store> {
        routes::router()
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(utils::crud_openapi(
            "Books",
            "Book",
            "BookInput",
            vec![
                utils::schema_of::<models::Book>(),
                utils::schema_of::<models::BookInput>(),
                utils::schema_of::<authors::models::Author>(),
                utils::schema_of::<categories::models::Category>(),
            ],
        ))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    title       TEXT NOT NULL,
                    description TEXT,
                    author_id   INTEGER REFERENCES authors (id) ON DELETE SET NULL,
                    category_id INTEGER REFERENCES categories (id) ON DELETE SET NULL
                );
                CREATE INDEX IF NOT EXISTS books_author_id ON books (author_id);
                CREATE INDEX IF NOT EXISTS books_category_id ON books (category_id);
                "#,
        }]
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(ctx.store.pool())
            .await?;
        tracing::info!(module = self.name(), books = count.0, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
