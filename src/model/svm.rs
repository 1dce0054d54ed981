//! Support Vector Machine classifier (inference only)
//!
//! Parameters come from an offline training run: the support vectors, their
//! dual coefficients (`alpha_i * y_i`) and the intercept.

use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Kernel function type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KernelType {
    /// Linear kernel: K(x, y) = x · y
    Linear,
    /// Polynomial kernel: K(x, y) = (γ * x · y + r)^d
    Polynomial { degree: usize, gamma: f64, coef0: f64 },
    /// Radial Basis Function (Gaussian): K(x, y) = exp(-γ * ||x - y||²)
    RBF { gamma: f64 },
    /// Sigmoid kernel: K(x, y) = tanh(γ * x · y + r)
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::RBF { gamma: 1.0 }
    }
}

impl KernelType {
    fn apply(&self, x1: &ArrayView1<f64>, x2: &ArrayView1<f64>) -> f64 {
        match self {
            KernelType::Linear => x1.dot(x2),
            KernelType::Polynomial { degree, gamma, coef0 } => {
                (*gamma * x1.dot(x2) + coef0).powi((*degree).min(i32::MAX as usize) as i32)
            }
            KernelType::RBF { gamma } => {
                let norm_sq: f64 = x1
                    .iter()
                    .zip(x2.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (-gamma * norm_sq).exp()
            }
            KernelType::Sigmoid { gamma, coef0 } => (*gamma * x1.dot(x2) + coef0).tanh(),
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            KernelType::Linear => true,
            KernelType::Polynomial { gamma, coef0, .. } | KernelType::Sigmoid { gamma, coef0 } => {
                gamma.is_finite() && coef0.is_finite()
            }
            KernelType::RBF { gamma } => gamma.is_finite(),
        }
    }
}

/// Fitted binary Support Vector Classifier
#[derive(Debug, Clone)]
pub struct SVMClassifier {
    kernel: KernelType,
    support_vectors: Array2<f64>,
    dual_coef: Array1<f64>,
    intercept: f64,
    /// `[negative class, positive class]`
    classes: [i64; 2],
}

impl SVMClassifier {
    /// Build a classifier from fitted parameters, checking that they agree in shape.
    pub fn new(
        kernel: KernelType,
        support_vectors: Array2<f64>,
        dual_coef: Array1<f64>,
        intercept: f64,
        classes: [i64; 2],
    ) -> Result<Self> {
        if support_vectors.nrows() == 0 {
            return Err(ClassifierError::ConfigError(
                "SVM needs at least one support vector".to_string(),
            ));
        }
        if dual_coef.len() != support_vectors.nrows() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} dual coefficients", support_vectors.nrows()),
                actual: dual_coef.len().to_string(),
            });
        }
        if !kernel.is_finite()
            || !intercept.is_finite()
            || support_vectors.iter().chain(dual_coef.iter()).any(|v| !v.is_finite())
        {
            return Err(ClassifierError::ConfigError(
                "SVM parameters contain non-finite values".to_string(),
            ));
        }

        Ok(Self {
            kernel,
            support_vectors,
            dual_coef,
            intercept,
            classes,
        })
    }

    pub fn n_features(&self) -> usize {
        self.support_vectors.ncols()
    }

    fn score_sample(&self, sample: &ArrayView1<f64>) -> f64 {
        self.support_vectors
            .rows()
            .into_iter()
            .zip(self.dual_coef.iter())
            .map(|(sv, &coef)| coef * self.kernel.apply(&sv, sample))
            .sum::<f64>()
            + self.intercept
    }

    /// Signed distance to the separating surface, one score per row
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} columns", self.n_features()),
                actual: x.ncols().to_string(),
            });
        }
        Ok(x.rows().into_iter().map(|row| self.score_sample(&row)).collect())
    }

    /// Predict class labels: positive scores map to the second class
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        let scores = self.decision_function(x)?;
        Ok(scores.mapv(|s| if s > 0.0 { self.classes[1] } else { self.classes[0] }))
    }
}
