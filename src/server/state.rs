//! Application state

use crate::data::{DataLoader, Dataset};
use crate::error::{ClassifierError, Result};
use crate::model::ModelBundle;
use crate::service::{ModelInfoService, PredictionService};

use super::ServerConfig;

/// Everything a handler needs, built once before the listener binds and
/// never mutated afterwards. Shared as `Arc<AppState>` without locks.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub dataset: Dataset,
    pub bundle: ModelBundle,
}

impl AppState {
    /// Load the dataset and model bundle named in `config`
    pub fn load(config: ServerConfig) -> Result<Self> {
        let dataset = DataLoader::new().load_csv(&config.data_path)?;
        let bundle = ModelBundle::load(&config.model_path)?;
        Self::new(config, dataset, bundle)
    }

    /// Check that the artifacts agree with each other before serving traffic
    pub fn new(config: ServerConfig, dataset: Dataset, bundle: ModelBundle) -> Result<Self> {
        let absent: Vec<&str> = bundle
            .selected_features()
            .iter()
            .filter(|f| !dataset.has_column(f))
            .map(String::as_str)
            .collect();
        if !absent.is_empty() {
            return Err(ClassifierError::ConfigError(format!(
                "model features missing from dataset: {}",
                absent.join(", ")
            )));
        }

        let state = Self {
            config,
            dataset,
            bundle,
        };
        // fails fast on an empty class or an all-missing feature
        state.model_info().describe()?;
        Ok(state)
    }

    pub fn model_info(&self) -> ModelInfoService<'_> {
        ModelInfoService::new(&self.dataset, self.bundle.selected_features())
    }

    pub fn predictor(&self) -> PredictionService<'_> {
        PredictionService::new(&self.bundle)
    }
}
