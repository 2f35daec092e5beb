// Shared test helpers for building detectors over the shipped model.

use std::path::PathBuf;
use std::sync::Arc;

use url_verdict::{Classifier, Detector, FeatureExtractor};

/// Path of the model artifact shipped in `models/`.
pub fn shipped_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/url_forest.json")
}

/// Detector over the shipped model with network lookups disabled.
#[allow(dead_code)] // Used by other test files
pub fn offline_detector() -> Detector {
    let classifier = Classifier::load(shipped_model_path()).expect("Failed to load shipped model");
    Detector::new(FeatureExtractor::offline(), classifier)
        .expect("Shipped model does not match the extractor")
}

/// Same as [`offline_detector`], shared.
#[allow(dead_code)] // Used by other test files
pub fn shared_offline_detector() -> Arc<Detector> {
    Arc::new(offline_detector())
}
