//! HTTP gateway
//!
//! Routes:
//! - `POST /users` - enroll a player
//! - `GET /api/v1/queue` - queue size and group size
//! - `GET /api/v1/health` - store-backed health probe
//! - `GET /api-docs/openapi.json` - OpenAPI document

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::engine::MatchEngine;
use state::AppState;

/// Build the gateway router over an engine
pub fn router(engine: Arc<MatchEngine>) -> Router {
    let state = Arc::new(AppState::new(engine));

    Router::new()
        .route("/users", post(handlers::enroll_player))
        .route("/api/v1/queue", get(handlers::queue_status))
        .route("/api/v1/health", get(handlers::health_check))
        .with_state(state)
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
}

/// Bind `addr` and serve until Ctrl-C
pub async fn run_server(addr: &str, engine: Arc<MatchEngine>) -> anyhow::Result<()> {
    let app = router(engine);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
