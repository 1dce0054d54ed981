//! CSV loading and cleaning

use crate::error::{ClassifierError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Column whose `?` placeholders mark missing measurements.
pub const SENTINEL_COLUMN: &str = "bare_nuclei";
/// Row identifier column, dropped on load.
pub const ID_COLUMN: &str = "ID";
/// Class label column (`2` benign, `4` malignant).
pub const CLASS_COLUMN: &str = "class";

const MISSING_SENTINEL: &str = "?";
/// Raw class code of a benign sample
pub const BENIGN_CODE: f64 = 2.0;
/// Raw class code of a malignant sample
pub const MALIGNANT_CODE: f64 = 4.0;

/// Loader for the historical sample table
#[derive(Debug, Clone, Default)]
pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and clean a CSV file.
    ///
    /// `bare_nuclei` placeholders become nulls before the column is made numeric,
    /// and the `ID` column is removed. Nothing else is touched.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let start = Instant::now();

        let file = File::open(path).map_err(|e| {
            ClassifierError::DataError(format!("cannot open {}: {}", path.display(), e))
        })?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| ClassifierError::DataError(format!("cannot parse {}: {}", path.display(), e)))?;

        let dataset = Dataset::from_frame(df)?;
        tracing::info!(
            path = %path.display(),
            rows = dataset.height(),
            columns = dataset.column_names().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

/// Immutable, cleaned sample table
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Clean an already-parsed frame.
    pub fn from_frame(mut df: DataFrame) -> Result<Self> {
        if has_column(&df, SENTINEL_COLUMN) {
            let cleaned = replace_sentinel(df.column(SENTINEL_COLUMN)?.as_materialized_series())?;
            df.with_column(cleaned)?;
        }

        if has_column(&df, ID_COLUMN) {
            df = df.drop(ID_COLUMN)?;
        }

        Ok(Self { frame: df })
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        has_column(&self.frame, name)
    }

    /// Column coerced to `Float64`; entries that do not parse (and NaN) become null.
    pub fn numeric_series(&self, name: &str) -> Result<Float64Chunked> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| ClassifierError::FeatureNotFound(name.to_string()))?;
        let series = column.as_materialized_series().cast(&DataType::Float64)?;
        let ca = series.f64()?;
        if ca.is_nan().any() {
            let cleaned: Float64Chunked = ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect();
            return Ok(cleaned.with_name(series.name().clone()));
        }
        Ok(ca.clone())
    }

    /// Rows whose `class` equals `code` exactly. Null and any other value,
    /// including non-integral codes, fall outside the mask.
    pub fn class_mask(&self, code: f64) -> Result<BooleanChunked> {
        let class = self.numeric_series(CLASS_COLUMN)?;
        Ok(class.equal(code).fill_null_with_values(false)?)
    }
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Turns `?` into null and the column into `Float64`. Any other
/// unparseable entry is rejected.
fn replace_sentinel(series: &Series) -> Result<Series> {
    if series.dtype() != &DataType::String {
        return Ok(series.cast(&DataType::Float64)?);
    }

    let ca = series.str()?;
    let mut values: Vec<Option<f64>> = Vec::with_capacity(ca.len());
    for (row, raw) in ca.into_iter().enumerate() {
        let value = match raw.map(str::trim) {
            None | Some(MISSING_SENTINEL) => None,
            Some(text) => Some(text.parse::<f64>().map_err(|_| {
                ClassifierError::DataError(format!(
                    "unable to parse {:?} in column {} at row {}",
                    text,
                    series.name(),
                    row
                ))
            })?),
        };
        values.push(value);
    }

    let cleaned: Float64Chunked = values.into_iter().collect();
    Ok(cleaned.with_name(series.name().clone()).into_series())
}
