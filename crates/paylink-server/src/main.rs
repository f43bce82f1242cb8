//! paylink HTTP Server
//!
//! Axum-based server exposing the checkout endpoint and serving the
//! compiled web frontend.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paylink_core::{MemoryPaymentStore, PaymentStore};

use crate::config::ServerConfig;
use crate::handlers::{create_checkout, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let store = build_store(&config).await?;
    tracing::info!("✓ Payment store: {}", store.name());

    let app = app(AppState::new(store), &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 paylink server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  POST /api/checkout    - Create pending payment");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with CORS open to every origin
fn app(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/checkout", post(create_checkout))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(feature = "postgres")]
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn PaymentStore>> {
    if let Some(url) = &config.database_url {
        let store = paylink_core::PgPaymentStore::connect(url).await?;
        return Ok(Arc::new(store));
    }

    tracing::warn!("⚠ DATABASE_URL not set - payments are kept in memory");
    Ok(Arc::new(MemoryPaymentStore::new()))
}

#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn PaymentStore>> {
    if config.database_url.is_some() {
        tracing::warn!("⚠ DATABASE_URL ignored - built without the postgres feature");
    }

    tracing::warn!("⚠ Payments are kept in memory");
    Ok(Arc::new(MemoryPaymentStore::new()))
}
