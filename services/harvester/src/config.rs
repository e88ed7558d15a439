//! services/harvester/src/config.rs
//!
//! Defines the service's configuration structure and loading logic.
//!
//! Deployment concerns are loaded from environment variables at startup; the
//! `.env` file is used for local development. Per-run parameters (product,
//! window, sampling) come from the CLI instead.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the Steam store API.
    pub api_base: String,
    /// Directory where export files are written.
    pub output_dir: PathBuf,
    pub log_level: Level,
    pub http_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base = std::env::var("STEAM_API_BASE")
            .unwrap_or_else(|_| "https://store.steampowered.com".to_string());

        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./review_exports"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let http_timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue("HTTP_TIMEOUT_SECS".to_string(), raw.clone())
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            api_base,
            output_dir,
            log_level,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}
