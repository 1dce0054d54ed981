//! Feature scaling with training-time parameters

use crate::error::{ClassifierError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Type of scaler the parameters came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalerType {
    /// Standard scaling (z-score normalization): (x - mean) / std
    Standard,
    /// Min-Max scaling: (x - min) / (max - min)
    MinMax,
    /// Robust scaling using median and IQR
    Robust,
    /// Max absolute scaling: x / max(|x|)
    MaxAbs,
    /// No scaling
    None,
}

/// Fitted scaler. Every type reduces to `(x - center) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    scaler_type: ScalerType,
    /// mean, min, median or zero depending on the type
    center: Vec<f64>,
    /// std, range, IQR or max-abs depending on the type
    scale: Vec<f64>,
}

impl Scaler {
    pub fn new(scaler_type: ScalerType, center: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            scaler_type,
            center,
            scale,
        }
    }

    /// A scaler that leaves `n_features` columns untouched
    pub fn identity(n_features: usize) -> Self {
        Self::new(ScalerType::None, vec![0.0; n_features], vec![1.0; n_features])
    }

    pub fn scaler_type(&self) -> &ScalerType {
        &self.scaler_type
    }

    pub(crate) fn validate(&self, n_features: usize) -> Result<()> {
        for (what, params) in [("center", &self.center), ("scale", &self.scale)] {
            if params.len() != n_features {
                return Err(ClassifierError::ShapeError {
                    expected: format!("{} scaler {} values", n_features, what),
                    actual: params.len().to_string(),
                });
            }
            if params.iter().any(|v| !v.is_finite()) {
                return Err(ClassifierError::ConfigError(format!(
                    "scaler {} contains non-finite values",
                    what
                )));
            }
        }
        Ok(())
    }

    /// Scale column-wise
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.center.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} columns", self.center.len()),
                actual: x.ncols().to_string(),
            });
        }
        if self.scaler_type == ScalerType::None {
            return Ok(x.clone());
        }

        let mut out = x.clone();
        for ((mut column, &center), &scale) in out
            .columns_mut()
            .into_iter()
            .zip(&self.center)
            .zip(&self.scale)
        {
            // constant training columns are stored with a zero scale
            let scale = if scale == 0.0 { 1.0 } else { scale };
            column.mapv_inplace(|v| (v - center) / scale);
        }
        Ok(out)
    }
}
