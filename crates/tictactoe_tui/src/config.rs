//! Terminal host configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for the terminal host, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TuiConfig {
    /// File receiving log output (the terminal belongs to the UI).
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// File receiving one JSON line per accepted move.
    #[serde(default)]
    sync_file: Option<PathBuf>,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe_tui.log")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_filter: default_log_filter(),
            sync_file: None,
        }
    }
}

impl TuiConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Loads configuration, falling back to defaults if the file is absent.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let config = Self::from_file(path)?;
        info!(sync = config.sync_file.is_some(), "Config loaded successfully");
        Ok(config)
    }

    /// Applies command-line overrides; `None` keeps the file value.
    pub fn with_overrides(mut self, log_file: Option<PathBuf>, sync_file: Option<PathBuf>) -> Self {
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        if sync_file.is_some() {
            self.sync_file = sync_file;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
