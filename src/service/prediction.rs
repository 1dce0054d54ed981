//! Single-row prediction with input validation

use crate::error::{ClassifierError, Result};
use crate::model::{class_label, ModelBundle};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /predict`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub features: Map<String, Value>,
}

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: i64,
    pub label: String,
    pub used_features: Vec<String>,
}

/// Absent, null and empty-string values all count as missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numbers pass through, strings are parsed; everything else is rejected.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Stateless validator and runner over a loaded bundle
pub struct PredictionService<'a> {
    bundle: &'a ModelBundle,
}

impl<'a> PredictionService<'a> {
    pub fn new(bundle: &'a ModelBundle) -> Self {
        Self { bundle }
    }

    /// Validate a feature row and classify it.
    ///
    /// Every missing feature is reported before any value is parsed; every
    /// unparseable value is reported before anything is computed.
    pub fn predict(&self, features: &Map<String, Value>) -> Result<Prediction> {
        let row = self.validate(features)?;
        let required = self.bundle.selected_features();

        let x = Array2::from_shape_vec((1, required.len()), row)?;
        let predicted = self
            .bundle
            .predict(&x)
            .map_err(|e| ClassifierError::InferenceError(e.to_string()))?;
        let class = predicted
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::InferenceError("classifier returned no output".to_string()))?;

        tracing::debug!(prediction = class, label = class_label(class), "Prediction computed");
        Ok(Prediction {
            prediction: class,
            label: class_label(class).to_string(),
            used_features: required.to_vec(),
        })
    }

    /// Values in bundle column order
    pub fn validate(&self, features: &Map<String, Value>) -> Result<Vec<f64>> {
        let required = self.bundle.selected_features();

        let missing: Vec<String> = required
            .iter()
            .filter(|f| is_missing(features.get(f.as_str())))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ClassifierError::MissingFeatures(missing));
        }

        let mut row = Vec::with_capacity(required.len());
        let mut invalid = Vec::new();
        for feature in required {
            match features.get(feature.as_str()).and_then(coerce_numeric) {
                Some(v) => row.push(v),
                None => invalid.push(feature.clone()),
            }
        }
        if !invalid.is_empty() {
            return Err(ClassifierError::InvalidValues(invalid));
        }

        Ok(row)
    }
}
