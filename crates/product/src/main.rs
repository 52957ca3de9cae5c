use anyhow::{Context, Result};
use product::{
    abstract_trait::product::repository::DynProductStore,
    handler::AppRouter,
    repository::{InMemoryProductStore, PostgresProductStore},
    seed::seed_if_empty,
    state::AppState,
};
use shared::{
    config::{Config, ConnectionManager, StoreBackend},
    utils::init_logger,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _log_guard = init_logger("product-service", config.dev_mode, config.enable_file_log);

    info!(
        "🚀 Starting Product Service (store backend: {})",
        config.store_backend
    );

    let store = build_store(&config)
        .await
        .context("Failed to initialize product store")?;

    let state = AppState::new(store);

    if config.seed_data {
        seed_if_empty(
            &state.di_container.product_store,
            &state.di_container.product_command,
        )
        .await
        .context("Failed to seed sample products")?;
    }

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to run HTTP server")?;

    info!("✅ Product Service shutdown complete.");
    Ok(())
}

async fn build_store(config: &Config) -> Result<DynProductStore> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryProductStore::new())),
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;

            let pool =
                ConnectionManager::new_pool(database_url, config.db_min_conn, config.db_max_conn)
                    .await
                    .context("Failed to initialize database pool")?;

            let store = PostgresProductStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("Failed to create products table")?;

            Ok(Arc::new(store))
        }
    }
}
