//! On-disk model artifact format.
//!
//! A random forest serialized as JSON. Trees are flattened node arrays in the
//! same shape scikit-learn uses internally: split nodes point at child indices,
//! leaves carry one weight per class.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "model_type": "random_forest",
//!   "feature_names": ["have_ip", "have_at"],
//!   "classes": [0, 1],
//!   "trees": [
//!     { "nodes": [
//!       { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
//!       { "value": [0.9, 0.1] },
//!       { "value": [0.1, 0.9] }
//!     ] }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error_handling::ModelLoadError;

/// Artifact format understood by this build.
pub const FORMAT_VERSION: u32 = 1;
/// The only classifier type this adapter evaluates.
pub const MODEL_TYPE: &str = "random_forest";
/// Output classes every artifact must declare, in order.
pub const CLASSES: [i64; 2] = [0, 1];

/// Top-level artifact document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifact {
    /// Format version, must equal [`FORMAT_VERSION`]
    pub format_version: u32,
    /// Classifier type, must equal [`MODEL_TYPE`]
    pub model_type: String,
    /// Feature names in the order the model was trained on
    pub feature_names: Vec<String>,
    /// Output class labels
    pub classes: Vec<i64>,
    /// The forest
    pub trees: Vec<Tree>,
}

/// One decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tree {
    /// Flattened nodes; index 0 is the root
    pub nodes: Vec<Node>,
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Go `left` when `features[feature] <= threshold`, else `right`
    Split {
        /// Feature index
        feature: usize,
        /// Split threshold
        threshold: f64,
        /// Child index taken when the value is at or below the threshold
        left: usize,
        /// Child index taken otherwise
        right: usize,
    },
    /// Class weights (counts or probabilities)
    Leaf {
        /// One non-negative weight per class
        value: Vec<f64>,
    },
}

impl Artifact {
    /// Checks every structural invariant the evaluator relies on.
    ///
    /// After this passes, walking any tree from the root terminates at a leaf
    /// and every leaf has one finite, non-negative weight per class.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedFormat(self.format_version));
        }
        if self.model_type != MODEL_TYPE {
            return Err(ModelLoadError::UnsupportedModelType(self.model_type.clone()));
        }
        if self.classes != CLASSES {
            return Err(ModelLoadError::InvalidClasses(self.classes.clone()));
        }
        self.validate_feature_names()?;
        if self.trees.is_empty() {
            return Err(ModelLoadError::InvalidTree {
                tree: 0,
                reason: "forest has no trees".to_string(),
            });
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.feature_names.len(), self.classes.len())
                .map_err(|reason| ModelLoadError::InvalidTree {
                    tree: index,
                    reason,
                })?;
        }
        Ok(())
    }

    fn validate_feature_names(&self) -> Result<(), ModelLoadError> {
        if self.feature_names.is_empty() {
            return Err(ModelLoadError::InvalidFeatureNames(
                "feature list is empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(ModelLoadError::InvalidFeatureNames(format!(
                    "duplicate feature '{name}'"
                )));
            }
        }
        Ok(())
    }
}

impl Tree {
    fn validate(&self, feature_count: usize, class_count: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= feature_count {
                        return Err(format!(
                            "node {index} splits on feature {feature}, model has {feature_count}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    // Children after parents rules out cycles
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {index} has invalid child {child}"));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != class_count {
                        return Err(format!(
                            "leaf {index} has {} weights, expected {class_count}",
                            value.len()
                        ));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(format!("leaf {index} has a negative or non-finite weight"));
                    }
                    if value.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("leaf {index} has zero total weight"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walks from the root to a leaf and returns its weights.
    ///
    /// Only called on validated trees.
    pub(crate) fn leaf_for(&self, features: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}
