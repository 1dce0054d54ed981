//! Command-line interface: run the server, or query the model without HTTP.

use clap::{Args, Parser, Subcommand};
use colored::*;
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::model::ModelBundle;
use crate::server::{AppState, ServerConfig};
use crate::service::{ModelInfo, PredictRequest, Prediction, PredictionService};

fn dim(s: &str) -> ColoredString { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn ok(s: &str) -> ColoredString { s.truecolor(100, 210, 120) }
fn warn(s: &str) -> ColoredString { s.truecolor(230, 120, 100) }

#[derive(Parser)]
#[command(name = "cytology")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Benign/malignant tissue classifier service")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Artifact locations; unset flags fall back to the environment, then to
/// files next to the executable.
#[derive(Args, Debug, Clone, Default)]
pub struct ArtifactArgs {
    /// Dataset CSV
    #[arg(long, env = "DATA_PATH")]
    pub data: Option<PathBuf>,

    /// Model bundle JSON
    #[arg(long, env = "MODEL_PATH")]
    pub model: Option<PathBuf>,
}

impl ArtifactArgs {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(ref data) = self.data {
            config.data_path = data.clone();
        }
        if let Some(ref model) = self.model {
            config.model_path = model.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        #[arg(long, env = "API_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, env = "API_PORT", default_value = "5000")]
        port: u16,

        /// Directory with the web client
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,

        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Print the model-info document as JSON
    Describe {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Classify one sample
    Predict {
        /// Feature values as name=value
        #[arg(value_name = "NAME=VALUE")]
        features: Vec<String>,

        /// Read `{"features": {...}}` from a JSON file instead
        #[arg(short, long, conflicts_with = "features")]
        input: Option<PathBuf>,

        /// Model bundle JSON
        #[arg(long, env = "MODEL_PATH")]
        model: Option<PathBuf>,
    },
}

/// Parse `name=value` pairs. Values stay strings; the prediction service
/// does the numeric coercion.
pub fn parse_feature_pairs(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected NAME=VALUE, got {:?}", pair))?;
            Ok((name.trim().to_string(), Value::String(value.trim().to_string())))
        })
        .collect()
}

pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
    artifacts: &ArtifactArgs,
) -> anyhow::Result<()> {
    use crate::server::run_server;

    let mut config = ServerConfig {
        host: host.to_string(),
        port,
        ..Default::default()
    };
    if let Some(dir) = static_dir {
        config.static_dir = dir;
    }
    artifacts.apply(&mut config);

    println!();
    println!("  {}  {}", "Cytology classifier".white().bold(), dim(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    println!("  {} {}", dim("Web UI "), accent(&format!("http://{}:{}", host, port)));
    println!("  {} {}", dim("Health "), accent(&format!("http://{}:{}/health", host, port)));
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}

/// Model-info document for the configured artifacts
pub fn describe_artifacts(artifacts: &ArtifactArgs) -> anyhow::Result<ModelInfo> {
    let mut config = ServerConfig::default();
    artifacts.apply(&mut config);

    let state = AppState::load(config)?;
    Ok(state.model_info().describe()?)
}

pub fn cmd_describe(artifacts: &ArtifactArgs) -> anyhow::Result<()> {
    let info = describe_artifacts(artifacts)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Classify one sample given as `name=value` pairs or a `{"features": {...}}` file
pub fn run_predict(
    features: &[String],
    input: Option<&PathBuf>,
    model: Option<&PathBuf>,
) -> anyhow::Result<Prediction> {
    let model_path = model
        .cloned()
        .unwrap_or_else(|| ServerConfig::default().model_path);
    let bundle = ModelBundle::load(&model_path)?;

    let features = match input {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<PredictRequest>(&text)?.features
        }
        None => parse_feature_pairs(features)?,
    };

    Ok(PredictionService::new(&bundle).predict(&features)?)
}

pub fn cmd_predict(
    features: &[String],
    input: Option<&PathBuf>,
    model: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let prediction = run_predict(features, input, model)?;
    let label = if prediction.prediction == crate::model::MALIGNANT {
        warn(&prediction.label)
    } else {
        ok(&prediction.label)
    };
    println!("  {} {} {}", accent("›"), label.bold(), dim(&format!("(class {})", prediction.prediction)));
    Ok(())
}
