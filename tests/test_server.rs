//! Integration test: Server API endpoints

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cytology::server::create_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(fixture: &common::Fixture) -> axum::Router {
    let state = Arc::new(common::state(fixture));
    create_router(state, &fixture.config)
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = common::fixture();
    let (status, body) = get(test_app(&fixture), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_model_info_shape() {
    let fixture = common::fixture();
    let (status, body) = get(test_app(&fixture), "/model-info").await;
    assert_eq!(status, StatusCode::OK);

    let info: Value = serde_json::from_slice(&body).unwrap();
    let selected: Vec<&str> = info["selected_features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(selected, common::FEATURES);

    for feature in common::FEATURES {
        let min = info["ranges"][feature]["min"].as_f64().unwrap();
        let max = info["ranges"][feature]["max"].as_f64().unwrap();
        assert!(min.is_finite() && max.is_finite());
        assert!(min <= max, "{feature}: {min} > {max}");
    }

    let presets = info["presets"].as_object().unwrap();
    let mut names: Vec<&String> = presets.keys().collect();
    names.sort();
    assert_eq!(names, ["benign_sample", "benign_typical", "malignant_sample", "malignant_typical"]);
    for preset in presets.values() {
        let preset = preset.as_object().unwrap();
        assert_eq!(preset.len(), common::FEATURES.len());
        for feature in common::FEATURES {
            assert!(preset[feature].is_f64(), "{feature} missing from preset");
        }
    }

    assert_eq!(info["labels"]["bare_nuclei"], "Bare Nuclei");
    assert_eq!(info["helptext"]["mitoses"], "How often cells appear to be dividing (1–10).");
    assert!(info["note"].as_str().unwrap().contains("not medical advice"));
}

#[tokio::test]
async fn test_model_info_is_deterministic() {
    let fixture = common::fixture();
    let app = test_app(&fixture);
    let (_, first) = get(app.clone(), "/model-info").await;
    let (_, second) = get(app, "/model-info").await;

    let first: Value = serde_json::from_slice(&first).unwrap();
    let second: Value = serde_json::from_slice(&second).unwrap();
    assert_eq!(first["ranges"], second["ranges"]);
    assert_eq!(first["presets"], second["presets"]);
}

#[tokio::test]
async fn test_predict_all_fives() {
    let fixture = common::fixture();
    let body = common::uniform_features(json!(5)).to_string();
    let (status, body) = post_json(test_app(&fixture), "/predict", body).await;

    assert_eq!(status, StatusCode::OK);
    let prediction = body["prediction"].as_i64().unwrap();
    assert!(prediction == 0 || prediction == 1);
    let expected_label = if prediction == 1 { "Malignant" } else { "Benign" };
    assert_eq!(body["label"], expected_label);
    assert_eq!(body["used_features"], json!(common::FEATURES));
}

#[tokio::test]
async fn test_predict_labels_follow_classes() {
    let fixture = common::fixture();
    let app = test_app(&fixture);

    let (_, low) = post_json(app.clone(), "/predict", common::uniform_features(json!(2)).to_string()).await;
    assert_eq!(low["prediction"], 0);
    assert_eq!(low["label"], "Benign");

    let (_, high) = post_json(app, "/predict", common::uniform_features(json!("9")).to_string()).await;
    assert_eq!(high["prediction"], 1);
    assert_eq!(high["label"], "Malignant");
}

#[tokio::test]
async fn test_predict_missing_features() {
    let fixture = common::fixture();
    let mut body = common::uniform_features(json!(5));
    let features = body["features"].as_object_mut().unwrap();
    features.remove("mitoses");
    features.insert("bare_nuclei".to_string(), json!(""));
    features.insert("uniformity_of_cell_size".to_string(), json!("abc"));

    let (status, body) = post_json(test_app(&fixture), "/predict", body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing feature values: ['bare_nuclei', 'mitoses']");
}

#[tokio::test]
async fn test_predict_invalid_values() {
    let fixture = common::fixture();
    let mut body = common::uniform_features(json!(5));
    body["features"]["clump_thickness"] = json!("abc");
    body["features"]["normal_nucleoli"] = json!("1o");

    let (status, body) = post_json(test_app(&fixture), "/predict", body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Non-numeric or invalid values for: ['clump_thickness', 'normal_nucleoli']"
    );
}

#[tokio::test]
async fn test_predict_without_body() {
    let fixture = common::fixture();
    let (status, body) = post_json(test_app(&fixture), "/predict", "not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Missing feature values: ['clump_thickness'"));
}

#[tokio::test]
async fn test_predict_wrong_method() {
    let fixture = common::fixture();
    let (status, _) = get(test_app(&fixture), "/predict").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_root_serves_index() {
    let fixture = common::fixture();
    let (status, body) = get(test_app(&fixture), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), common::INDEX_HTML);
}

#[tokio::test]
async fn test_static_asset_served() {
    let fixture = common::fixture();
    let (status, body) = get(test_app(&fixture), "/assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "console.log('app');");
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_index() {
    let fixture = common::fixture();
    let (status, body) = get(test_app(&fixture), "/results/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), common::INDEX_HTML);
}
