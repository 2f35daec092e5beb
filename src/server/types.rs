//! Request/response schemas and shared state for the HTTP service.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detector::Detector;
use crate::error_handling::PredictError;

/// Shared state for the HTTP service
#[derive(Clone)]
pub struct AppState {
    /// The classification pipeline
    pub detector: Arc<Detector>,
}

/// Body of `POST /predict`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// URL to classify; any string, including empty
    pub url: String,
}

/// JSON response for `POST /predict`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictResponse {
    /// `Legitimate` or `Phishing`
    pub prediction: String,
}

/// JSON response for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` when the service answers
    pub status: &'static str,
    /// Classifier type from the artifact
    pub model_type: String,
    /// Number of model inputs
    pub feature_count: usize,
    /// Number of trees in the forest
    pub trees: usize,
    /// Whether DNS, WHOIS and page lookups run
    pub network_features: bool,
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error kind
    pub error: &'static str,
    /// Human-readable description
    pub detail: String,
}

/// Errors surfaced to API callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The body is not JSON or lacks a string `url` field.
    #[error("{0}")]
    InvalidRequest(String),

    /// The extractor and model disagree on the feature vector.
    #[error(transparent)]
    ModelContract(#[from] PredictError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelContract(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::ModelContract(_) => "model_contract_violation",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.kind(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
