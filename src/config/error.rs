//! Errors raised while loading settings

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` or `TGNOTIFY_CONFIG_FILE` named a file that is not there
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Sources merged but did not fit [`Settings`](super::Settings)
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value for {field}: {message}")]
    ValidationError { field: String, message: String },

    /// File syntax or source merge failure reported by the `config` crate
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::FileNotFound { path: path.into() }
    }
}
