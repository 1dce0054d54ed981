//! Logistic regression classifier (inference only)

use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};

/// Fitted binary logistic regression
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    coef: Array1<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LogisticClassifier {
    pub fn new(coef: Array1<f64>, intercept: f64, classes: [i64; 2]) -> Result<Self> {
        if coef.is_empty() {
            return Err(ClassifierError::ConfigError(
                "logistic model has no coefficients".to_string(),
            ));
        }
        if !intercept.is_finite() || coef.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::ConfigError(
                "logistic parameters contain non-finite values".to_string(),
            ));
        }
        Ok(Self {
            coef,
            intercept,
            classes,
        })
    }

    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coef.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} columns", self.coef.len()),
                actual: x.ncols().to_string(),
            });
        }
        Ok(x.dot(&self.coef) + self.intercept)
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        let scores = self.decision_function(x)?;
        Ok(scores.mapv(|s| if s > 0.0 { self.classes[1] } else { self.classes[0] }))
    }
}
