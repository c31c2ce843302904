//! tg-notify library
//!
//! Sends text messages to a Telegram chat through the Bot API `sendMessage`
//! method. The [`TelegramNotifier`] is the entry point for library use; the
//! [`cli`] module backs the `tg-notify` binary.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;

pub use config::NotifyOptions;
pub use error::{ErrorKind, NotifyError, NotifyResult};
pub use models::NotificationResult;
pub use services::{NotificationProvider, TelegramNotifier};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
