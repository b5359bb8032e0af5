use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid backend URL: {0}")]
    InvalidBackendUrl(String),

    #[error("Failed to load configs")]
    LoadConfig(#[from] config::ConfigError),
}

/// Stdout tracing with `RUST_LOG`-style filtering, INFO by default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
