//! HTTP server module
//!
//! Serves the classifier API (`/health`, `/model-info`, `/predict`) and the
//! single-page web client from a static directory.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Default artifact names, looked up next to the executable
pub const DEFAULT_DATA_FILE: &str = "breast-cancer-wisconsin-data1.csv";
pub const DEFAULT_MODEL_FILE: &str = "model_bundle.json";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub static_dir: PathBuf,
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let base = Self::base_dir();
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_path: env_path("DATA_PATH").unwrap_or_else(|| base.join(DEFAULT_DATA_FILE)),
            model_path: env_path("MODEL_PATH").unwrap_or_else(|| base.join(DEFAULT_MODEL_FILE)),
            static_dir: env_path("STATIC_DIR").unwrap_or_else(|| base.join(DEFAULT_STATIC_DIR)),
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
        }
    }
}

impl ServerConfig {
    /// Directory holding the running executable; artifacts default to living there.
    fn base_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Config with every artifact resolved inside `dir`
    pub fn with_base_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_path: dir.join(DEFAULT_DATA_FILE),
            model_path: dir.join(DEFAULT_MODEL_FILE),
            static_dir: dir.join(DEFAULT_STATIC_DIR),
            ..Self::default()
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Load the artifacts, then serve until ctrl+c
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        data_path = %config.data_path.display(),
        model_path = %config.model_path.display(),
        started_at = %start_time.to_rfc3339(),
        "Loading artifacts"
    );

    // startup-fatal: nothing is served if either artifact is unusable
    let state = Arc::new(AppState::load(config.clone())?);

    if !config.static_dir.exists() {
        warn!(static_dir = %config.static_dir.display(), "Static directory not found, web UI will be unavailable");
    }

    let app = create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        static_dir = %config.static_dir.display(),
        "Server listening and ready to accept connections"
    );

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
        let uptime = chrono::Utc::now().signed_duration_since(start_time);
        info!(uptime_secs = uptime.num_seconds(), "Shutdown signal received, stopping server gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
