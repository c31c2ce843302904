//! Notification system with pluggable providers.
//!
//! The core trait `NotificationProvider` abstracts "send this text"; the only
//! provider is Telegram's `sendMessage`.

mod provider;
mod telegram_provider;

pub use provider::NotificationProvider;
pub use telegram_provider::{
    TELEGRAM_API_BASE_URL, TelegramNotifier, TelegramNotifierBuilder, interpret_response,
};
