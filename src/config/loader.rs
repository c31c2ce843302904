//! Configuration loader for tg-notify
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for a specific configuration file
pub const CONFIG_FILE_ENV: &str = "TGNOTIFY_CONFIG_FILE";

/// Configuration file read when no explicit file is given
pub const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "TGNOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader
///
/// Sources, lowest priority first:
/// 1. `config/default.toml` (optional), or an explicit file (required)
/// 2. `TGNOTIFY_*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit configuration file; a missing file is an error
    config_file: Option<PathBuf>,
    /// Fallback file used when `config_file` is unset; may be absent
    default_file: PathBuf,
}

impl ConfigLoader {
    /// Create a loader, honouring `TGNOTIFY_CONFIG_FILE`
    pub fn new() -> Self {
        Self {
            config_file: std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
            default_file: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Use `path` instead of the default file. `None` keeps the current choice.
    pub fn with_config_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        if let Some(path) = path {
            self.config_file = Some(path.into());
        }
        self
    }

    /// Change the optional fallback file
    pub fn with_default_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_file = path.into();
        self
    }

    /// The explicit configuration file, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => Self::add_file_source(builder, &self.default_file, false)?,
        };

        // TGNOTIFY_TELEGRAM__CHAT_ID -> telegram.chat_id
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }

    /// Environment variables with prefix `TGNOTIFY_` map onto configuration keys,
    /// with `__` separating nested keys.
    ///
    /// Parsing is left to serde so a numeric chat id stays a string.
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
