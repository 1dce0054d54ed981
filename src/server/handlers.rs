//! HTTP request handlers

use std::sync::Arc;
use axum::{body::Bytes, extract::State, Json};
use serde_json::json;
use tracing::{info, warn};

use crate::service::{ModelInfo, PredictRequest, Prediction};

use super::error::Result;
use super::state::AppState;

/// Liveness probe; independent of the loaded artifacts
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Feature ranges, presets, labels and help text for the client form
pub async fn model_info(State(state): State<Arc<AppState>>) -> Result<Json<ModelInfo>> {
    let info = state.model_info().describe()?;
    Ok(Json(info))
}

/// Classify one feature row.
///
/// The body is parsed leniently: anything that is not a JSON object with a
/// `features` map is treated as an empty request, which then fails the
/// missing-feature check.
pub async fn predict(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<Prediction>> {
    let request: PredictRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "Unreadable predict body, treating as empty");
            PredictRequest::default()
        }
    };

    match state.predictor().predict(&request.features) {
        Ok(prediction) => {
            info!(
                prediction = prediction.prediction,
                label = %prediction.label,
                "Prediction served"
            );
            Ok(Json(prediction))
        }
        Err(e) => {
            if e.is_client_error() {
                info!(error = %e, "Rejected predict request");
            }
            Err(e.into())
        }
    }
}
