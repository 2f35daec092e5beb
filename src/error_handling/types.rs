//! Error type definitions.
//!
//! This module defines the error types for each layer of the pipeline:
//! startup, model loading, prediction, and the HTTP transport.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client used for page features.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while loading a model artifact.
///
/// Any of these is fatal at startup: the service must not serve without a
/// model it can trust.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// The artifact file could not be read.
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not match the artifact schema.
    #[error("Corrupt model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact was written by an incompatible format version.
    #[error("Unsupported model format version {0}")]
    UnsupportedFormat(u32),

    /// The artifact describes a classifier type this adapter cannot evaluate.
    #[error("Unsupported model type '{0}'")]
    UnsupportedModelType(String),

    /// The artifact's output classes are not exactly `[0, 1]`.
    #[error("Model classes must be [0, 1], found {0:?}")]
    InvalidClasses(Vec<i64>),

    /// The artifact's feature list is empty or contains duplicates.
    #[error("Invalid feature names: {0}")]
    InvalidFeatureNames(String),

    /// A tree in the forest is structurally broken.
    #[error("Invalid tree {tree}: {reason}")]
    InvalidTree {
        /// Index of the offending tree
        tree: usize,
        /// What is wrong with it
        reason: String,
    },

    /// The artifact was trained on a different feature order than the extractor produces.
    #[error("Feature order mismatch at position {position}: model expects '{expected}', extractor produces '{actual}'")]
    FeatureOrderMismatch {
        /// First differing position
        position: usize,
        /// Name recorded in the artifact
        expected: String,
        /// Name produced by the extractor
        actual: String,
    },

    /// The artifact expects a different number of features than the extractor produces.
    #[error("Feature count mismatch: model expects {expected}, extractor produces {actual}")]
    FeatureCountMismatch {
        /// Count recorded in the artifact
        expected: usize,
        /// Count produced by the extractor
        actual: usize,
    },
}

/// Errors raised by `Classifier::predict`.
///
/// These signal a contract violation between extractor and model and are
/// never reinterpreted as a verdict.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The feature vector length differs from what the model was trained on.
    #[error("Feature vector has {actual} values, model expects {expected}")]
    ShapeMismatch {
        /// Length the model expects
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// A feature value is NaN or infinite.
    #[error("Feature {index} is not a finite number")]
    NonFiniteFeature {
        /// Position of the offending value
        index: usize,
    },
}
