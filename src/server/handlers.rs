//! HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::types::{ApiError, AppState, HealthResponse, PredictRequest, PredictResponse};

/// Classifies the URL in the request body.
///
/// The body is validated before the pipeline runs: anything other than a JSON
/// object with a string `url` is a 400 and extraction is never invoked.
pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        log::debug!("Rejected predict request: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    log::info!("Received URL: {}", request.url);
    let classification = state.detector.classify(&request.url).await.map_err(|e| {
        log::error!("Model contract violation for {}: {e}", request.url);
        ApiError::from(e)
    })?;
    log::info!("{} -> {}", request.url, classification.verdict);

    Ok(Json(PredictResponse {
        prediction: classification.verdict.as_str().to_string(),
    }))
}

/// Reports the loaded model.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier = state.detector.classifier();
    Json(HealthResponse {
        status: "ok",
        model_type: classifier.model_type().to_string(),
        feature_count: classifier.feature_count(),
        trees: classifier.tree_count(),
        network_features: state.detector.extractor().lookups_enabled(),
    })
}
