//! Error types for the cytology classifier service

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Missing feature values: {}", py_list(.0))]
    MissingFeatures(Vec<String>),

    #[error("Non-numeric or invalid values for: {}", py_list(.0))]
    InvalidValues(Vec<String>),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ClassifierError {
    /// Whether the error was caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClassifierError::MissingFeatures(_) | ClassifierError::InvalidValues(_)
        )
    }
}

/// Renders feature names the way the web client expects them: `['a', 'b']`.
fn py_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

impl From<polars::error::PolarsError> for ClassifierError {
    fn from(err: polars::error::PolarsError) -> Self {
        ClassifierError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ClassifierError {
    fn from(err: ndarray::ShapeError) -> Self {
        ClassifierError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClassifierError::DataError("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
    }

    #[test]
    fn test_missing_features_lists_every_name() {
        let err = ClassifierError::MissingFeatures(vec![
            "mitoses".to_string(),
            "bare_nuclei".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing feature values: ['mitoses', 'bare_nuclei']"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_invalid_values_message() {
        let err = ClassifierError::InvalidValues(vec!["clump_thickness".to_string()]);
        assert_eq!(
            err.to_string(),
            "Non-numeric or invalid values for: ['clump_thickness']"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClassifierError = io_err.into();
        assert!(matches!(err, ClassifierError::IoError(_)));
        assert!(!err.is_client_error());
    }
}
