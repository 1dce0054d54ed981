//! Fitted model artifacts
//!
//! The model bundle is produced by an offline training pipeline and loaded
//! once at startup. Everything here is inference only.

mod bundle;
mod linear;
mod svm;

pub use bundle::ModelBundle;
pub use linear::LogisticClassifier;
pub use svm::{KernelType, SVMClassifier};

use crate::error::Result;
use ndarray::{Array1, Array2};

/// Class index for benign samples
pub const BENIGN: i64 = 0;
/// Class index for malignant samples
pub const MALIGNANT: i64 = 1;

/// Human-readable name for a predicted class
pub fn class_label(class: i64) -> &'static str {
    if class == MALIGNANT {
        "Malignant"
    } else {
        "Benign"
    }
}

/// Classifier shipped in a bundle
#[derive(Debug, Clone)]
pub enum Classifier {
    Svm(SVMClassifier),
    Logistic(LogisticClassifier),
}

impl Classifier {
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::Svm(m) => m.n_features(),
            Classifier::Logistic(m) => m.n_features(),
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        match self {
            Classifier::Svm(m) => m.predict(x),
            Classifier::Logistic(m) => m.predict(x),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Classifier::Svm(_) => "svm",
            Classifier::Logistic(_) => "logistic",
        }
    }
}
