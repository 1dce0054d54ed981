//! Descriptive statistics for the client form: ranges, presets, labels, help text

use crate::data::{Dataset, BENIGN_CODE, MALIGNANT_CODE};
use crate::error::{ClassifierError, Result};
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seed for the per-class sample draw
pub const SAMPLE_SEED: u64 = 42;

pub const DISCLAIMER: &str = "Examples are for testing the model only and are not medical advice.";

const DEFAULT_HELP: &str = "Value from 1–10.";

const FEATURE_HELP: &[(&str, &str)] = &[
    ("clump_thickness", "How thick the cell clumps appear (1–10)."),
    ("uniformity_of_cell_size", "How uniform cell sizes look (1–10)."),
    ("uniformity_of_cell_shape", "How uniform cell shapes look (1–10)."),
    ("marginal_adhesion", "How strongly cells stick at the edges (1–10)."),
    ("single_epithelial_cell_size", "Size of single epithelial cells (1–10)."),
    ("bare_nuclei", "How many nuclei appear without surrounding cell material (1–10)."),
    ("bland_chromatin", "Texture/appearance of chromatin in the nucleus (1–10)."),
    ("normal_nucleoli", "Prominence of nucleoli inside the nucleus (1–10)."),
    ("mitoses", "How often cells appear to be dividing (1–10)."),
];

/// Observed bounds of one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

/// One example row, keyed by feature name
pub type Preset = BTreeMap<String, f64>;

/// Response body of `GET /model-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub selected_features: Vec<String>,
    pub ranges: BTreeMap<String, FeatureRange>,
    pub presets: BTreeMap<String, Preset>,
    pub labels: BTreeMap<String, String>,
    pub helptext: BTreeMap<String, String>,
    pub note: String,
}

/// `clump_thickness` -> `Clump Thickness`
pub fn feature_label(feature: &str) -> String {
    let mut out = String::with_capacity(feature.len());
    let mut prev_is_letter = false;
    for c in feature.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// One-sentence description shown next to the input
pub fn feature_help(feature: &str) -> &'static str {
    FEATURE_HELP
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, text)| *text)
        .unwrap_or(DEFAULT_HELP)
}

/// Computes the model-info document from the dataset. Nothing is cached:
/// the dataset is small and immutable, so every call recomputes.
pub struct ModelInfoService<'a> {
    dataset: &'a Dataset,
    features: &'a [String],
}

impl<'a> ModelInfoService<'a> {
    pub fn new(dataset: &'a Dataset, features: &'a [String]) -> Self {
        Self { dataset, features }
    }

    pub fn describe(&self) -> Result<ModelInfo> {
        let filled = self.median_filled()?;

        let mut ranges = BTreeMap::new();
        for feature in self.features {
            let ca = float_column(&filled, feature)?;
            let (min, max) = ca.min().zip(ca.max()).ok_or_else(|| {
                ClassifierError::DataError(format!("feature {} has no rows", feature))
            })?;
            ranges.insert(feature.clone(), FeatureRange { min, max });
        }

        let benign = self.class_subset(&filled, BENIGN_CODE, "benign")?;
        let malignant = self.class_subset(&filled, MALIGNANT_CODE, "malignant")?;

        let mut presets = BTreeMap::new();
        presets.insert("benign_typical".to_string(), self.median_row(&benign)?);
        presets.insert("malignant_typical".to_string(), self.median_row(&malignant)?);
        presets.insert("benign_sample".to_string(), self.sample_row(&benign)?);
        presets.insert("malignant_sample".to_string(), self.sample_row(&malignant)?);

        Ok(ModelInfo {
            selected_features: self.features.to_vec(),
            ranges,
            presets,
            labels: self
                .features
                .iter()
                .map(|f| (f.clone(), feature_label(f)))
                .collect(),
            helptext: self
                .features
                .iter()
                .map(|f| (f.clone(), feature_help(f).to_string()))
                .collect(),
            note: DISCLAIMER.to_string(),
        })
    }

    /// Selected columns, numeric-coerced, with nulls replaced by the column median
    fn median_filled(&self) -> Result<DataFrame> {
        let columns = self
            .features
            .iter()
            .map(|f| {
                let ca = self.dataset.numeric_series(f)?;
                let median = ca.median().ok_or_else(|| {
                    ClassifierError::DataError(format!("feature {} has no numeric values", f))
                })?;
                let filled = ca.fill_null_with_values(median)?;
                Ok(Column::from(filled.into_series()))
            })
            .collect::<Result<Vec<Column>>>()?;
        Ok(DataFrame::new(columns)?)
    }

    /// Rows of `filled` whose raw class code is exactly `code`
    fn class_subset(&self, filled: &DataFrame, code: f64, name: &str) -> Result<DataFrame> {
        let subset = filled.filter(&self.dataset.class_mask(code)?)?;
        if subset.height() == 0 {
            return Err(ClassifierError::DataError(format!(
                "dataset has no {} rows",
                name
            )));
        }
        Ok(subset)
    }

    fn median_row(&self, subset: &DataFrame) -> Result<Preset> {
        self.features
            .iter()
            .map(|feature| {
                let m = float_column(subset, feature)?.median().ok_or_else(|| {
                    ClassifierError::DataError(format!("no values for {}", feature))
                })?;
                Ok((feature.clone(), m))
            })
            .collect()
    }

    /// A fresh generator per draw keeps the pick independent of call order.
    fn sample_row(&self, subset: &DataFrame) -> Result<Preset> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(SAMPLE_SEED);
        let row = rng.gen_range(0..subset.height());
        self.features
            .iter()
            .map(|feature| {
                let value = float_column(subset, feature)?.get(row).ok_or_else(|| {
                    ClassifierError::DataError(format!("no value for {} in row {}", feature, row))
                })?;
                Ok((feature.clone(), value))
            })
            .collect()
    }
}

fn float_column<'df>(df: &'df DataFrame, name: &str) -> Result<&'df Float64Chunked> {
    Ok(df.column(name)?.as_materialized_series().f64()?)
}
