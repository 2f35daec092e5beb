//! Error handling.
//!
//! Errors are grouped by layer:
//! - **Initialization**: logger and HTTP client setup
//! - **Model loading**: missing, corrupt, or incompatible artifacts (fatal at startup)
//! - **Prediction**: feature vectors that break the model contract (fatal to one request)
//!
//! Feature extraction has no error type: lookups degrade to default values.

mod types;

// Re-export public API
pub use types::{InitializationError, ModelLoadError, PredictError};
