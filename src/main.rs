//! # Order Service
//!
//! Serves the `/orders` JSON API over a configurable storage backend.
//!
//! ## Architecture
//!
//! - Axum handles HTTP routing and request/response lifecycle
//! - Handlers validate payloads and map repository outcomes to status codes
//! - Orders are stored in memory or in PostgreSQL via SQLx, chosen by `APP_STORAGE`

use std::sync::Arc;

use tracing::info;

use order_service::config::{AppConfig, StorageBackend};
use order_service::repository::{InMemoryOrderRepository, PgOrderRepository};
use order_service::{create_app, SharedRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_service=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting order service");

    let config = AppConfig::from_env()?;

    let repository: SharedRepository = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory order storage");
            Arc::new(InMemoryOrderRepository::new())
        }
        StorageBackend::Postgres => {
            let repo =
                PgOrderRepository::connect(&config.database_url, config.max_connections).await?;
            info!("Connected to order database");

            repo.migrate().await?;
            info!("Order migrations complete");
            Arc::new(repo)
        }
    };

    let app = create_app(repository);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
