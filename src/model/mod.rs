//! Classifier adapter.
//!
//! Loads a serialized random forest once and evaluates feature vectors
//! against it. The adapter does no feature engineering: it receives a slice
//! of numbers and returns a class, or an error when the slice does not fit
//! the model.

pub mod artifact;

use std::fmt;
use std::path::Path;

use crate::error_handling::{ModelLoadError, PredictError};

pub use artifact::Artifact;

/// Human-readable classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Class 0
    Legitimate,
    /// Any other class
    Phishing,
}

impl Verdict {
    /// Maps a model class to a verdict: `0` is legitimate, anything else phishing.
    pub fn from_class(class: i64) -> Self {
        if class == 0 {
            Verdict::Legitimate
        } else {
            Verdict::Phishing
        }
    }

    /// Label used in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Legitimate => "Legitimate",
            Verdict::Phishing => "Phishing",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded, validated, immutable classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    artifact: Artifact,
}

impl Classifier {
    /// Reads and validates a model artifact.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoadError` if the file is missing, is not valid JSON, or
    /// violates the artifact schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let classifier = Self::from_json(&content)?;
        log::info!(
            "Loaded {} with {} trees over {} features from {}",
            classifier.artifact.model_type,
            classifier.tree_count(),
            classifier.feature_count(),
            path.display()
        );
        Ok(classifier)
    }

    /// Parses and validates an artifact held in memory.
    pub fn from_json(content: &str) -> Result<Self, ModelLoadError> {
        let artifact: Artifact = serde_json::from_str(content)?;
        Self::from_artifact(artifact)
    }

    /// Validates an already-deserialized artifact.
    pub fn from_artifact(artifact: Artifact) -> Result<Self, ModelLoadError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    /// Feature names in the order the model expects them.
    pub fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    /// Number of input features.
    pub fn feature_count(&self) -> usize {
        self.artifact.feature_names.len()
    }

    /// Number of trees in the forest.
    pub fn tree_count(&self) -> usize {
        self.artifact.trees.len()
    }

    /// Classifier type recorded in the artifact.
    pub fn model_type(&self) -> &str {
        &self.artifact.model_type
    }

    /// Output classes, always `[0, 1]` for a loaded model.
    pub fn classes(&self) -> &[i64] {
        &self.artifact.classes
    }

    /// Averaged class probabilities for one feature vector.
    ///
    /// Each tree's leaf weights are normalized before averaging, matching how
    /// scikit-learn forests combine trees.
    ///
    /// # Errors
    ///
    /// `PredictError::ShapeMismatch` if the vector length differs from the
    /// model's feature count, `PredictError::NonFiniteFeature` on NaN/inf.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        self.check_input(features)?;

        let mut totals = vec![0.0; self.artifact.classes.len()];
        for tree in &self.artifact.trees {
            let leaf = tree.leaf_for(features);
            let weight: f64 = leaf.iter().sum();
            for (total, w) in totals.iter_mut().zip(leaf) {
                *total += w / weight;
            }
        }
        let trees = self.artifact.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= trees);
        Ok(totals)
    }

    /// Predicts the class for one feature vector.
    ///
    /// Ties go to the lower class index.
    pub fn predict(&self, features: &[f64]) -> Result<i64, PredictError> {
        let proba = self.predict_proba(features)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.artifact.classes[best])
    }

    fn check_input(&self, features: &[f64]) -> Result<(), PredictError> {
        let expected = self.feature_count();
        if features.len() != expected {
            return Err(PredictError::ShapeMismatch {
                expected,
                actual: features.len(),
            });
        }
        match features.iter().position(|x| !x.is_finite()) {
            Some(index) => Err(PredictError::NonFiniteFeature { index }),
            None => Ok(()),
        }
    }
}
