//! HTTP service exposing the classifier.
//!
//! Provides two endpoints:
//! - `POST /predict` - Classifies `{"url": "..."}` as Legitimate or Phishing
//! - `GET /health` - Reports the loaded model
//!
//! Cross-origin requests are allowed from any origin. This is a development
//! posture; put a proxy with a narrower policy in front for public deployments.

mod handlers;
mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::detector::Detector;
use handlers::{health_handler, predict_handler};
pub use types::{ApiError, AppState, ErrorBody, HealthResponse, PredictRequest, PredictResponse};

/// Builds the router around a shared detector.
pub fn router(detector: Arc<Detector>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { detector })
}

/// Binds `listen_addr` and serves until the process is stopped.
pub async fn serve(listen_addr: &str, detector: Arc<Detector>) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {listen_addr}"))?;

    log::info!("Listening on http://{listen_addr}/");
    log::info!("  - Predict: POST http://{listen_addr}/predict");
    log::info!("  - Health: GET http://{listen_addr}/health");

    axum::serve(listener, router(detector))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
