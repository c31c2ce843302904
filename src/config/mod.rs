//! Configuration management module for tg-notify
//!
//! Settings come from an optional TOML file overlaid with `TGNOTIFY_*`
//! environment variables. Telegram credentials additionally fall back to
//! `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` at send time (see
//! [`credentials`]).
//!
//! # Configuration Priority (lowest to highest)
//! 1. `config/default.toml`, or the file given by `--config` / `TGNOTIFY_CONFIG_FILE`
//! 2. `TGNOTIFY_*` environment variables

pub mod credentials;
pub mod error;
pub mod loader;
pub mod settings;

pub use credentials::{
    BOT_TOKEN_ENV, CHAT_ID_ENV, CredentialSource, NotifyOptions, ProcessEnv, ResolvedCredentials,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{LoggerSettings, Settings, TelegramSettings};
