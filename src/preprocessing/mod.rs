//! Data preprocessing module
//!
//! Fitted transforms shipped inside the model bundle:
//! - Missing value imputation
//! - Feature scaling (Standard, MinMax, Robust, MaxAbs)

mod imputer;
mod scaler;

pub use imputer::{ImputeStrategy, Imputer};
pub use scaler::{Scaler, ScalerType};
