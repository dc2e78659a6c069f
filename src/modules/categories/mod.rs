pub mod models;
pub mod repo;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Migration, Module, Store};

use crate::utils;

pub(crate) const MODULE_NAME: &str = "categories";

/// Categories collection
pub struct CategoriesModule;

impl CategoriesModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "categories module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router<Store> {
        routes::router()
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(utils::crud_openapi(
            "Categories",
            "Category",
            "CategoryInput",
            vec![
                utils::schema_of::<models::Category>(),
                utils::schema_of::<models::CategoryInput>(),
            ],
        ))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS categories (
                    id   INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL
                );
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "categories module stopped");
        Ok(())
    }
}

/// Create a new instance of the categories module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(CategoriesModule::new())
}
