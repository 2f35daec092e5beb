//! Model artifact loading from disk.

mod helpers;

use std::io::Write;

use tempfile::NamedTempFile;

use helpers::shipped_model_path;
use url_verdict::error_handling::ModelLoadError;
use url_verdict::features::{FEATURE_COUNT, UNKNOWN};
use url_verdict::{extract_lexical, Classifier, Config, Detector, FeatureName};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn sample_vectors() -> Vec<Vec<f64>> {
    let mut vectors: Vec<Vec<f64>> = [
        "http://192.168.1.1/login.php@verify-paypal.com",
        "https://www.wikipedia.org",
        "",
        "http://bit.ly/abc",
        "https://secure-https-login.example.com//redirect?to=http://evil.test",
    ]
    .iter()
    .map(|url| extract_lexical(url).as_slice().to_vec())
    .collect();
    vectors.push(vec![0.0; FEATURE_COUNT]);
    vectors.push(vec![1.0; FEATURE_COUNT]);
    vectors.push(vec![UNKNOWN; FEATURE_COUNT]);
    vectors
}

#[test]
fn test_shipped_model_loads() {
    let model = Classifier::load(shipped_model_path()).unwrap();
    assert_eq!(model.model_type(), "random_forest");
    assert_eq!(model.feature_count(), FEATURE_COUNT);
    assert_eq!(model.classes(), &[0, 1]);
    let expected: Vec<String> = FeatureName::names().into_iter().map(String::from).collect();
    assert_eq!(model.feature_names(), expected.as_slice());
}

#[test]
fn test_shipped_model_output_domain_is_binary() {
    let model = Classifier::load(shipped_model_path()).unwrap();
    for vector in sample_vectors() {
        let class = model.predict(&vector).unwrap();
        assert!(class == 0 || class == 1, "class {class} for {vector:?}");
        let proba = model.predict_proba(&vector).unwrap();
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_loading_twice_gives_identical_predictions() {
    let first = Classifier::load(shipped_model_path()).unwrap();
    let second = Classifier::load(shipped_model_path()).unwrap();
    for vector in sample_vectors() {
        assert_eq!(first.predict(&vector), second.predict(&vector));
        assert_eq!(first.predict_proba(&vector), second.predict_proba(&vector));
    }
}

#[test]
fn test_copied_artifact_behaves_like_original() {
    let content = std::fs::read_to_string(shipped_model_path()).unwrap();
    let file = write_temp(&content);
    let original = Classifier::load(shipped_model_path()).unwrap();
    let copy = Classifier::load(file.path()).unwrap();
    for vector in sample_vectors() {
        assert_eq!(original.predict(&vector), copy.predict(&vector));
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match Classifier::load(&path) {
        Err(ModelLoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {:?}", other.err()),
    }
}

#[test]
fn test_corrupt_file_is_parse_error() {
    let file = write_temp("{ this is not json");
    assert!(matches!(
        Classifier::load(file.path()),
        Err(ModelLoadError::Parse(_))
    ));
}

#[test]
fn test_truncated_artifact_is_parse_error() {
    let content = std::fs::read_to_string(shipped_model_path()).unwrap();
    let file = write_temp(&content[..content.len() / 2]);
    assert!(matches!(
        Classifier::load(file.path()),
        Err(ModelLoadError::Parse(_))
    ));
}

#[test]
fn test_detector_rejects_model_for_other_features() {
    let file = write_temp(
        r#"{
            "format_version": 1,
            "model_type": "random_forest",
            "feature_names": ["length", "entropy"],
            "classes": [0, 1],
            "trees": [ { "nodes": [ { "value": [1.0, 0.0] } ] } ]
        }"#,
    );
    let config = Config {
        network_features: false,
        ..Default::default()
    };
    let err = Detector::load(file.path(), &config).unwrap_err();
    assert!(format!("{err:#}").contains("different feature set"));
}

#[test]
fn test_detector_load_reports_missing_model_path() {
    let config = Config {
        network_features: false,
        ..Default::default()
    };
    let err = Detector::load(std::path::Path::new("/no/such/model.json"), &config).unwrap_err();
    assert!(format!("{err:#}").contains("/no/such/model.json"));
}
