//! Request-level services
//!
//! Both services borrow the immutable dataset and bundle; neither keeps state
//! between calls.

mod model_info;
mod prediction;

pub use model_info::{
    feature_help, feature_label, FeatureRange, ModelInfo, ModelInfoService, Preset, DISCLAIMER,
    SAMPLE_SEED,
};
pub use prediction::{coerce_numeric, PredictRequest, Prediction, PredictionService};
