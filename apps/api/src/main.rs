//! # Folio API
//!
//! HTTP JSON server for the Folio bookstore.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio API Server                               │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► Handlers ───► PostgreSQL                 │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                                 Redis                                   │
//! │                              (Cart hashes)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use folio_db::{Database, DbConfig};

use crate::auth::JwtManager;
use crate::cart::CartStore;
use crate::config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Folio API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_url = %config.database_url.chars().take(30).collect::<String>(),
        "Configuration loaded"
    );

    // Connect to database and run migrations
    let db = Database::connect(DbConfig::new(&config.database_url)).await?;
    info!("Connected to PostgreSQL");

    // Connect to Redis (cart store)
    let cart = CartStore::connect(&config.redis_url).await?;
    info!("Connected to Redis");

    // Create shared state
    let jwt = JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_access_lifetime_secs,
        config.jwt_refresh_lifetime_secs,
    );
    let state = Arc::new(AppState {
        db,
        cart,
        jwt,
        config: config.clone(),
    });

    // Build router and serve
    let app = routes::router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
