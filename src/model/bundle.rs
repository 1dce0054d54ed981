//! Model bundle: required features plus the fitted imputer, scaler and classifier

use super::{Classifier, KernelType, LogisticClassifier, SVMClassifier, BENIGN, MALIGNANT};
use crate::error::{ClassifierError, Result};
use crate::preprocessing::{Imputer, Scaler};
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk layout written by the training pipeline
#[derive(Debug, Deserialize)]
struct BundleFile {
    selected_features: Vec<String>,
    imputer: Imputer,
    scaler: Scaler,
    model: ModelFile,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ModelFile {
    Svm {
        kernel: KernelType,
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
        intercept: f64,
        classes: Vec<i64>,
    },
    Logistic {
        coef: Vec<f64>,
        intercept: f64,
        classes: Vec<i64>,
    },
}

impl ModelFile {
    fn into_classifier(self, n_features: usize) -> Result<Classifier> {
        match self {
            ModelFile::Svm {
                kernel,
                support_vectors,
                dual_coef,
                intercept,
                classes,
            } => {
                let n_support = support_vectors.len();
                if let Some(row) = support_vectors.iter().position(|sv| sv.len() != n_features) {
                    return Err(ClassifierError::ShapeError {
                        expected: format!("support vectors of width {}", n_features),
                        actual: format!("width {} at row {}", support_vectors[row].len(), row),
                    });
                }
                let flat: Vec<f64> = support_vectors.into_iter().flatten().collect();
                let support_vectors = Array2::from_shape_vec((n_support, n_features), flat)?;
                let svm = SVMClassifier::new(
                    kernel,
                    support_vectors,
                    Array1::from_vec(dual_coef),
                    intercept,
                    binary_classes(&classes)?,
                )?;
                Ok(Classifier::Svm(svm))
            }
            ModelFile::Logistic {
                coef,
                intercept,
                classes,
            } => {
                let model =
                    LogisticClassifier::new(Array1::from_vec(coef), intercept, binary_classes(&classes)?)?;
                Ok(Classifier::Logistic(model))
            }
        }
    }
}

fn binary_classes(classes: &[i64]) -> Result<[i64; 2]> {
    match classes {
        [a, b] if a != b && [*a, *b].iter().all(|c| *c == BENIGN || *c == MALIGNANT) => Ok([*a, *b]),
        _ => Err(ClassifierError::ConfigError(format!(
            "expected two distinct classes from {{{}, {}}}, got {:?}",
            BENIGN, MALIGNANT, classes
        ))),
    }
}

/// Immutable bundle, validated once when constructed
#[derive(Debug, Clone)]
pub struct ModelBundle {
    selected_features: Vec<String>,
    imputer: Imputer,
    scaler: Scaler,
    classifier: Classifier,
}

impl ModelBundle {
    /// Assemble a bundle from already fitted parts
    pub fn new(
        selected_features: Vec<String>,
        imputer: Imputer,
        scaler: Scaler,
        classifier: Classifier,
    ) -> Result<Self> {
        let bundle = Self {
            selected_features,
            imputer,
            scaler,
            classifier,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load and validate a bundle file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::ConfigError(format!("cannot read model bundle {}: {}", path.display(), e))
        })?;
        let bundle = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            features = bundle.selected_features.len(),
            classifier = bundle.classifier.name(),
            "Model bundle loaded"
        );
        Ok(bundle)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: BundleFile = serde_json::from_str(json)?;
        let classifier = file.model.into_classifier(file.selected_features.len())?;
        Self::new(file.selected_features, file.imputer, file.scaler, classifier)
    }

    fn validate(&self) -> Result<()> {
        let n = self.selected_features.len();
        if n == 0 {
            return Err(ClassifierError::ConfigError(
                "model bundle selects no features".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.selected_features.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(ClassifierError::ConfigError(format!(
                "feature {} selected more than once",
                dup
            )));
        }

        self.imputer.validate(n)?;
        self.scaler.validate(n)?;
        if self.classifier.n_features() != n {
            return Err(ClassifierError::ShapeError {
                expected: format!("classifier over {} features", n),
                actual: self.classifier.n_features().to_string(),
            });
        }
        Ok(())
    }

    /// Required input features, in column order
    pub fn selected_features(&self) -> &[String] {
        &self.selected_features
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Impute, scale, classify. Columns must follow `selected_features`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        let imputed = self.imputer.transform(x)?;
        let scaled = self.scaler.transform(&imputed)?;
        self.classifier.predict(&scaled)
    }
}
