//! Cytology classifier - Main Entry Point
//!
//! Serves the classifier over HTTP by default; `describe` and `predict`
//! query the artifacts directly.

use clap::Parser;
use cytology::cli::{cmd_describe, cmd_predict, cmd_serve, ArtifactArgs, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cytology=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, static_dir, artifacts }) => {
            cmd_serve(&host, port, static_dir, &artifacts).await?;
        }
        Some(Commands::Describe { artifacts }) => {
            cmd_describe(&artifacts)?;
        }
        Some(Commands::Predict { features, input, model }) => {
            cmd_predict(&features, input.as_ref(), model.as_ref())?;
        }
        None => {
            let defaults = cytology::server::ServerConfig::default();
            cmd_serve(&defaults.host, defaults.port, None, &ArtifactArgs::default()).await?;
        }
    }

    Ok(())
}
