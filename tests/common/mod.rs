//! Shared fixtures: a small dataset, a linear SVM bundle and a static site.

#![allow(dead_code)]

use cytology::server::{AppState, ServerConfig};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

pub const FEATURES: [&str; 9] = [
    "clump_thickness",
    "uniformity_of_cell_size",
    "uniformity_of_cell_shape",
    "marginal_adhesion",
    "single_epithelial_cell_size",
    "bare_nuclei",
    "bland_chromatin",
    "normal_nucleoli",
    "mitoses",
];

pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body><div id=\"root\"></div></body></html>";

const DATASET: &str = "\
ID,clump_thickness,uniformity_of_cell_size,uniformity_of_cell_shape,marginal_adhesion,single_epithelial_cell_size,bare_nuclei,bland_chromatin,normal_nucleoli,mitoses,class
1000025,5,1,1,1,2,1,3,1,1,2
1002945,5,4,4,5,7,10,3,2,1,2
1015425,3,1,1,1,2,2,3,1,1,2
1016277,6,8,8,1,3,4,3,7,1,2
1017023,4,1,1,3,2,?,3,1,1,2
1017122,8,10,10,8,7,10,9,7,1,4
1018099,1,1,1,1,2,10,3,1,1,2
1018561,2,1,2,1,2,1,3,1,1,2
1033078,2,1,1,1,2,1,1,1,5,2
1035283,1,1,1,1,1,1,3,1,1,2
1036172,2,1,1,1,2,1,2,1,1,2
1041801,5,3,3,3,2,3,4,4,1,4
1043999,1,1,1,1,2,3,3,1,1,2
1044572,8,7,5,10,7,9,5,5,4,4
1047630,7,4,6,4,6,1,4,3,1,4
1048672,4,1,1,1,2,1,2,1,1,2
1049815,4,1,1,1,2,1,3,1,1,2
1050670,10,7,7,6,4,10,4,1,2,4
1050718,6,1,1,1,2,1,3,1,1,2
1054590,7,3,2,10,5,10,5,4,4,4
1054593,10,5,5,3,6,7,7,10,1,4
1056784,3,1,1,1,2,?,3,1,1,2
";

/// Malignant exactly when the nine inputs sum to more than 47.
pub fn bundle_json() -> serde_json::Value {
    let n = FEATURES.len();
    json!({
        "selected_features": FEATURES,
        "imputer": {"strategy": "Median", "statistics": vec![1.0; n]},
        "scaler": {"scaler_type": "Standard", "center": vec![0.0; n], "scale": vec![1.0; n]},
        "model": {
            "type": "svm",
            "kernel": "Linear",
            "support_vectors": [vec![1.0; n], vec![10.0; n]],
            "dual_coef": [-1.0, 1.0],
            "intercept": -423.0,
            "classes": [0, 1],
        },
    })
}

/// Writes the artifacts into a fresh directory laid out like a deployment.
pub fn write_artifacts(dir: &Path) {
    std::fs::write(dir.join("breast-cancer-wisconsin-data1.csv"), DATASET).unwrap();
    std::fs::write(dir.join("model_bundle.json"), bundle_json().to_string()).unwrap();

    let static_dir = dir.join("static");
    std::fs::create_dir_all(static_dir.join("assets")).unwrap();
    std::fs::write(static_dir.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(static_dir.join("assets").join("app.js"), "console.log('app');").unwrap();
}

pub struct Fixture {
    pub dir: TempDir,
    pub config: ServerConfig,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origin: None,
        ..ServerConfig::with_base_dir(dir.path())
    };
    Fixture { dir, config }
}

pub fn state(fixture: &Fixture) -> AppState {
    AppState::load(fixture.config.clone()).unwrap()
}

/// A request body with every feature set to `value`.
pub fn uniform_features(value: serde_json::Value) -> serde_json::Value {
    let features: serde_json::Map<String, serde_json::Value> = FEATURES
        .iter()
        .map(|f| (f.to_string(), value.clone()))
        .collect();
    json!({ "features": features })
}
