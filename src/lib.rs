//! Cytology classifier service
//!
//! Exposes a pre-trained benign/malignant classifier over HTTP, alongside
//! descriptive statistics of the historical dataset for the web client.
//!
//! # Modules
//!
//! - [`data`] - CSV loading and cleaning
//! - [`preprocessing`] - Fitted imputer and scaler, column statistics
//! - [`model`] - Model bundle and classifiers (inference only)
//! - [`service`] - Model-info and prediction services
//! - [`server`] - HTTP server with REST API and static web client
//! - [`cli`] - Command-line interface

pub mod error;

pub mod data;
pub mod preprocessing;
pub mod model;
pub mod service;

pub mod server;
pub mod cli;

pub use error::{ClassifierError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ClassifierError, Result};
    pub use crate::data::{DataLoader, Dataset};
    pub use crate::preprocessing::{Imputer, ImputeStrategy, Scaler, ScalerType};
    pub use crate::model::{Classifier, KernelType, LogisticClassifier, ModelBundle, SVMClassifier};
    pub use crate::service::{ModelInfo, ModelInfoService, Prediction, PredictionService};
    pub use crate::server::{AppState, ServerConfig};
}
