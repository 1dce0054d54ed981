//! Missing value imputation with training-time statistics

use crate::error::{ClassifierError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Strategy the imputer was fitted with. Informational only; the fill
/// values are already in `statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with mean
    Mean,
    /// Replace with median
    Median,
    /// Replace with mode / most frequent value
    MostFrequent,
    /// Replace with a constant value
    Constant(f64),
}

/// Fitted imputer: column `j` fills NaN with `statistics[j]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    statistics: Vec<f64>,
}

impl Imputer {
    /// Create an imputer from fitted statistics
    pub fn new(strategy: ImputeStrategy, statistics: Vec<f64>) -> Self {
        Self { strategy, statistics }
    }

    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }

    pub fn n_features(&self) -> usize {
        self.statistics.len()
    }

    pub(crate) fn validate(&self, n_features: usize) -> Result<()> {
        if self.statistics.len() != n_features {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} imputer statistics", n_features),
                actual: self.statistics.len().to_string(),
            });
        }
        if let Some(j) = self.statistics.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::ConfigError(format!(
                "imputer statistic for column {} is not finite",
                j
            )));
        }
        Ok(())
    }

    /// Fill missing values (NaN) column-wise
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.statistics.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} columns", self.statistics.len()),
                actual: x.ncols().to_string(),
            });
        }

        let mut out = x.clone();
        for (mut column, &fill) in out.columns_mut().into_iter().zip(&self.statistics) {
            column.mapv_inplace(|v| if v.is_nan() { fill } else { v });
        }
        Ok(out)
    }
}
