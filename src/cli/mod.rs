//! CLI module for tg-notify
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration loading (config file + `TGNOTIFY_*` variables)
//! - Command handlers for send, test and check

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use executor::{execute_command, read_message};
pub use parser::{Cli, Commands, CredentialArgs};

use crate::config::{ConfigError, ConfigLoader, Settings};
use crate::logger::{LoggerError, init_logger};

/// Load settings from the file named by `--config` (or the default file)
/// and `TGNOTIFY_*` environment variables
///
/// # Errors
/// Returns error if the file is unreadable or the merged settings are invalid
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigLoader::new().with_config_file(cli.config.clone()).load()
}

/// Initialize logger from settings
///
/// `level_override` replaces the configured level, e.g. for `--verbose`.
///
/// # Errors
/// Returns error if the logger configuration is invalid or a global
/// subscriber is already installed
pub fn init_logger_from_settings(
    settings: &Settings,
    level_override: Option<&str>,
) -> Result<(), LoggerError> {
    let mut logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| LoggerError::config(e.to_string()))?;

    if let Some(level) = level_override {
        logger_config = logger_config.with_level(level);
    }

    init_logger(logger_config)
}
