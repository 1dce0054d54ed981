//! Integration test: CLI commands against on-disk artifacts

mod common;

use cytology::cli::{describe_artifacts, run_predict, ArtifactArgs};
use serde_json::json;

fn pairs(value: &str) -> Vec<String> {
    common::FEATURES
        .iter()
        .map(|f| format!("{}={}", f, value))
        .collect()
}

#[test]
fn test_predict_from_pairs() {
    let fixture = common::fixture();
    let model = fixture.config.model_path.clone();

    let prediction = run_predict(&pairs("5"), None, Some(&model)).unwrap();
    assert_eq!(prediction.prediction, 0);
    assert_eq!(prediction.label, "Benign");
    assert_eq!(prediction.used_features.len(), common::FEATURES.len());
}

#[test]
fn test_predict_from_input_file() {
    let fixture = common::fixture();
    let model = fixture.config.model_path.clone();
    let input = fixture.dir.path().join("sample.json");
    std::fs::write(&input, common::uniform_features(json!(9)).to_string()).unwrap();

    let prediction = run_predict(&[], Some(&input), Some(&model)).unwrap();
    assert_eq!(prediction.prediction, 1);
    assert_eq!(prediction.label, "Malignant");
}

#[test]
fn test_predict_reports_missing_features() {
    let fixture = common::fixture();
    let model = fixture.config.model_path.clone();

    let err = run_predict(&["mitoses=1".to_string()], None, Some(&model)).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Missing feature values: ["));
    assert!(message.contains("'clump_thickness'"));
    assert!(!message.contains("'mitoses'"));
}

#[test]
fn test_predict_with_unreadable_model() {
    let fixture = common::fixture();
    let model = fixture.dir.path().join("absent.json");
    assert!(run_predict(&pairs("5"), None, Some(&model)).is_err());
}

#[test]
fn test_describe_artifacts() {
    let fixture = common::fixture();
    let artifacts = ArtifactArgs {
        data: Some(fixture.config.data_path.clone()),
        model: Some(fixture.config.model_path.clone()),
    };

    let info = describe_artifacts(&artifacts).unwrap();
    assert_eq!(info.selected_features.len(), common::FEATURES.len());
    assert_eq!(info.presets.len(), 4);
    assert_eq!(info.labels["bare_nuclei"], "Bare Nuclei");
}
