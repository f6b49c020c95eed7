//! Server Configuration

use serde::Deserialize;
use std::path::PathBuf;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("models")
}

/// Server configuration, sourced from `FORECAST_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the model, scaler, and feature table artifacts
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            artifact_dir: default_artifact_dir(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment
    ///
    /// Recognized variables: `FORECAST_HOST`, `FORECAST_PORT`,
    /// `FORECAST_ARTIFACT_DIR`. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("FORECAST").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
