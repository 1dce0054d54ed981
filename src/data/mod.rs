//! Dataset loading
//!
//! The dataset is a static CSV of historical samples. It is read once at
//! startup and only ever used to derive descriptive statistics.

mod loader;

pub use loader::{
    DataLoader, Dataset, BENIGN_CODE, CLASS_COLUMN, ID_COLUMN, MALIGNANT_CODE, SENTINEL_COLUMN,
};
