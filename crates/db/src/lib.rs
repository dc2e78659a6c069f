//! SQLite storage handle shared by every request handler.
//!
//! The [`Store`] is opened once at process start, cloned into each handler
//! through router state, and closed once at shutdown.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

mod migration;

pub use migration::Migration;
pub use sqlx;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration '{module}/{id}' failed: {source}")]
    Migration {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

pub type DbResult<T> = Result<T, DbError>;

/// Process-wide handle to the relational store.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open a pool against `url` (e.g. `sqlite://BookStore.db`), creating the
    /// database file when it does not exist yet.
    pub async fn connect(url: &str) -> DbResult<Self> {
        Self::connect_with_options(url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Open a pool with an explicit connection limit.
    pub async fn connect_with_options(url: &str, max_connections: u32) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(
            target: "bookstore-db",
            url,
            max_connections,
            "database pool opened"
        );

        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the database is reachable.
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Apply every migration that has not been recorded yet.
    ///
    /// Each migration runs in its own transaction together with the row that
    /// records it in `_migrations`, so a failed statement leaves no trace.
    /// Returns the number of migrations applied by this call.
    pub async fn apply_migrations(&self, migrations: &[(String, Migration)]) -> DbResult<usize> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                module     TEXT NOT NULL,
                id         TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (module, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        let mut applied = 0;

        for (module, migration) in migrations {
            let recorded: Option<(i64,)> =
                sqlx::query_as("SELECT 1 FROM _migrations WHERE module = ? AND id = ?")
                    .bind(module)
                    .bind(migration.id)
                    .fetch_optional(&self.pool)
                    .await?;

            if recorded.is_some() {
                tracing::debug!(
                    target: "bookstore-db",
                    module = %module,
                    migration = migration.id,
                    "migration already applied"
                );
                continue;
            }

            let mut tx = self.pool.begin().await?;

            sqlx::raw_sql(migration.up)
                .execute(&mut *tx)
                .await
                .map_err(|source| DbError::Migration {
                    module: module.clone(),
                    id: migration.id,
                    source,
                })?;

            sqlx::query("INSERT INTO _migrations (module, id) VALUES (?, ?)")
                .bind(module)
                .bind(migration.id)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            applied += 1;

            tracing::info!(
                target: "bookstore-db",
                module = %module,
                migration = migration.id,
                "migration applied"
            );
        }

        Ok(applied)
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "bookstore-db", "database pool closed");
    }
}
