//! Credential resolution for the notifier.
//!
//! Each credential comes from an explicit override first and falls back to a
//! named key in a [`CredentialSource`]. The source is handed to the notifier,
//! so tests can resolve against a map instead of mutating the process
//! environment.

use std::collections::HashMap;
use std::fmt;

/// Environment variable holding the default bot token
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable holding the default chat id
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Read-only key/value lookup used for credential fallbacks.
///
/// Implementations treat empty values as absent.
pub trait CredentialSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl CredentialSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl CredentialSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Per-call credential overrides
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NotifyOptions {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl NotifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bot_token(mut self, bot_token: impl Into<String>) -> Self {
        self.bot_token = Some(bot_token.into());
        self
    }

    pub fn with_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Fills unset (or empty) overrides from `fallback`
    pub fn or(self, fallback: NotifyOptions) -> Self {
        Self {
            bot_token: non_empty(self.bot_token).or(non_empty(fallback.bot_token)),
            chat_id: non_empty(self.chat_id).or(non_empty(fallback.chat_id)),
        }
    }

    /// Resolves both credentials against `source`.
    ///
    /// An empty override counts as absent and falls through to the source.
    pub fn resolve(&self, source: &dyn CredentialSource) -> ResolvedCredentials {
        ResolvedCredentials {
            bot_token: non_empty(self.bot_token.clone()).or_else(|| source.get(BOT_TOKEN_ENV)),
            chat_id: non_empty(self.chat_id.clone()).or_else(|| source.get(CHAT_ID_ENV)),
        }
    }
}

impl fmt::Debug for NotifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyOptions")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Credentials after override/fallback resolution. Either may still be missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl ResolvedCredentials {
    pub fn is_complete(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// Bot token with everything past the bot id hidden, for display
    pub fn masked_bot_token(&self) -> Option<String> {
        self.bot_token.as_deref().map(mask_token)
    }
}

impl fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("bot_token", &self.masked_bot_token())
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `123456:ABC-DEF` becomes `123456:***`
pub fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _)) => format!("{bot_id}:***"),
        None => "***".to_string(),
    }
}
