//! The classification pipeline: URL → feature vector → class → verdict.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::error_handling::{ModelLoadError, PredictError};
use crate::features::{FeatureExtractor, FeatureName, FeatureVector, FEATURE_COUNT};
use crate::model::{Classifier, Verdict};

/// Immutable service object pairing a feature extractor with the model it feeds.
///
/// Construction checks that the model was trained on exactly the features the
/// extractor produces, in the same order, so drift between the two is caught
/// at startup rather than as silently wrong predictions.
#[derive(Debug)]
pub struct Detector {
    extractor: FeatureExtractor,
    classifier: Classifier,
}

/// A verdict together with the vector it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Features fed to the model
    pub features: FeatureVector,
    /// Raw model class
    pub class: i64,
    /// Mapped label
    pub verdict: Verdict,
}

impl Detector {
    /// Pairs an extractor with a classifier.
    ///
    /// # Errors
    ///
    /// `ModelLoadError::FeatureCountMismatch` or
    /// `ModelLoadError::FeatureOrderMismatch` when the model's feature names
    /// differ from the extractor's.
    pub fn new(extractor: FeatureExtractor, classifier: Classifier) -> Result<Self, ModelLoadError> {
        check_feature_contract(classifier.feature_names())?;
        Ok(Self {
            extractor,
            classifier,
        })
    }

    /// Loads the model and builds the extractor from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::load(&config.model_path, config)
    }

    /// Loads the model at `model_path`, using `config` for the extractor.
    pub fn load(model_path: &Path, config: &Config) -> Result<Self> {
        let classifier = Classifier::load(model_path)
            .with_context(|| format!("Failed to load model from {}", model_path.display()))?;
        let extractor =
            FeatureExtractor::from_config(config).context("Failed to initialize feature extractor")?;
        let detector = Self::new(extractor, classifier)
            .context("Model was trained on a different feature set")?;
        if !detector.extractor.lookups_enabled() {
            log::info!("Network features disabled; DNS, WHOIS and page features report unknown");
        }
        Ok(detector)
    }

    /// The loaded classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The feature extractor.
    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Classifies a URL.
    ///
    /// Extraction cannot fail; the only error is a model contract violation.
    pub async fn classify(&self, url: &str) -> Result<Classification, PredictError> {
        let features = self.extractor.extract(url).await;
        self.classify_features(features)
    }

    /// Classifies an already-extracted feature vector.
    pub fn classify_features(&self, features: FeatureVector) -> Result<Classification, PredictError> {
        let class = self.classifier.predict(features.as_slice())?;
        Ok(Classification {
            features,
            class,
            verdict: Verdict::from_class(class),
        })
    }
}

fn check_feature_contract(model_names: &[String]) -> Result<(), ModelLoadError> {
    let extractor_names = FeatureName::names();
    if model_names.len() != FEATURE_COUNT {
        return Err(ModelLoadError::FeatureCountMismatch {
            expected: model_names.len(),
            actual: FEATURE_COUNT,
        });
    }
    match model_names
        .iter()
        .zip(&extractor_names)
        .position(|(model, extractor)| model != extractor)
    {
        Some(position) => Err(ModelLoadError::FeatureOrderMismatch {
            position,
            expected: model_names[position].clone(),
            actual: extractor_names[position].to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Artifact;
    use crate::model::artifact::{Node, Tree, CLASSES, FORMAT_VERSION, MODEL_TYPE};

    fn stump_artifact(names: Vec<String>) -> Artifact {
        Artifact {
            format_version: FORMAT_VERSION,
            model_type: MODEL_TYPE.to_string(),
            feature_names: names,
            classes: CLASSES.to_vec(),
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: FeatureName::HaveIp.index(),
                        threshold: 0.5,
                        left: 1,
                        right: 2,
                    },
                    Node::Leaf {
                        value: vec![1.0, 0.0],
                    },
                    Node::Leaf {
                        value: vec![0.0, 1.0],
                    },
                ],
            }],
        }
    }

    fn extractor_names() -> Vec<String> {
        FeatureName::names().into_iter().map(String::from).collect()
    }

    #[tokio::test]
    async fn test_stump_classifies_ip_hosts() {
        let classifier = Classifier::from_artifact(stump_artifact(extractor_names())).unwrap();
        let detector = Detector::new(FeatureExtractor::offline(), classifier).unwrap();

        let ip = detector.classify("http://10.0.0.1/login").await.unwrap();
        assert_eq!(ip.verdict, Verdict::Phishing);
        assert_eq!(ip.class, 1);

        let named = detector.classify("https://example.com").await.unwrap();
        assert_eq!(named.verdict, Verdict::Legitimate);
    }

    #[test]
    fn test_rejects_reordered_features() {
        let mut names = extractor_names();
        names.swap(0, 1);
        let classifier = Classifier::from_artifact(stump_artifact(names)).unwrap();
        match Detector::new(FeatureExtractor::offline(), classifier) {
            Err(ModelLoadError::FeatureOrderMismatch {
                position,
                expected,
                actual,
            }) => {
                assert_eq!(position, 0);
                assert_eq!(expected, "have_at");
                assert_eq!(actual, "have_ip");
            }
            other => panic!("expected order mismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_errors_are_reportable() {
        let config = Config {
            network_features: false,
            ..Default::default()
        };
        let err = Detector::load(Path::new("/no/such/model.json"), &config).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load model"));

        let detector = crate::test_support::offline_detector();
        assert!(format!("{detector:?}").starts_with("Detector"));
    }

    #[test]
    fn test_rejects_truncated_feature_list() {
        let mut names = extractor_names();
        names.truncate(5);
        let classifier = Classifier::from_artifact(stump_artifact(names)).unwrap();
        assert!(matches!(
            Detector::new(FeatureExtractor::offline(), classifier),
            Err(ModelLoadError::FeatureCountMismatch {
                expected: 5,
                actual: 18
            })
        ));
    }
}
