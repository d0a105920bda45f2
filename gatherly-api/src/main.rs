//! # Gatherly API Server
//!
//! REST backend for the Gatherly events platform.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Authentication (JWT access/refresh token pairs)
//! - User profiles with interest and skill tags
//! - Event CRUD with category/mode/tag filters
//! - Atomic RSVP toggling
//! - Profile-driven event recommendations
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p gatherly-api
//! ```

use gatherly_api::{
    app::{build_router, AppState},
    config::Config,
};
use gatherly_shared::db;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatherly_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Gatherly API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = db::pool::create_pool(db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    sqlx::migrate!("../migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives a shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
