use anyhow::Context;
use bookstore_db::Store;
use bookstore_kernel::{settings::Settings, InitCtx};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;
    bookstore_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "bookstore bootstrap starting"
    );

    let store = Store::connect_with_options(&settings.database.url, settings.database.max_connections)
        .await
        .with_context(|| format!("failed to open database '{}'", settings.database.url))?;

    let registry = bookstore_app::registry();
    let applied = registry.run_migrations(&store).await?;
    tracing::info!(applied, "schema up to date");

    let ctx = InitCtx {
        settings: &settings,
        store: &store,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookstore bootstrap complete");

    let served = bookstore_http::start_server(&registry, &settings, store.clone()).await;

    registry.stop_modules().await?;
    store.close().await;

    served
}
