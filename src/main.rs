use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod domain;
mod event_sourcing;
mod metrics;
mod models;

use api::{ActorRegistry, AppState};
use config::Config;
use domain::inventory::InMemoryInventory;
use domain::order::OrderCommandHandler;
use event_sourcing::store::PostgresEventStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gazman_orders=debug")),
        )
        .init();

    tracing::info!("Starting gazman-orders lifecycle service");

    let config = Config::from_env()?;
    tracing::info!(tokens = config.api_tokens.len(), "Loaded configuration");

    // === 1. Connect to Postgres and prepare the event store schema ===
    tracing::info!("Connecting to Postgres...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    PostgresEventStore::<domain::order::OrderEvent>::init_schema(&pool).await?;
    let store: Arc<PostgresEventStore<domain::order::OrderEvent>> =
        Arc::new(PostgresEventStore::new(pool));

    // === 2. Build the domain services ===
    // TODO: back InventoryService with the product catalog service once it
    // exposes reservation endpoints; until then reservations are in-process.
    let inventory = Arc::new(InMemoryInventory::new());
    let orders = Arc::new(OrderCommandHandler::new(store, inventory));

    // === 3. Metrics and auth ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!(
        "Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );
    let registry = ActorRegistry::new(config.api_tokens.clone());

    // === 4. Serve ===
    let state = AppState { orders, metrics };
    api::run(state, registry, &config.http_addr, config.http_port).await?;

    Ok(())
}
