//! Notification models for the Telegram `sendMessage` call.
//!
//! This module holds the validated request, the caller-facing result and the
//! wire types exchanged with the Bot API.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::error::{NotifyError, NotifyResult};

/// Markup dialect sent with every message
pub const PARSE_MODE_HTML: &str = "HTML";

/// Status text of a successful send
pub const SENT_MESSAGE: &str = "Message sent successfully";

/// Fallback rejection text when Telegram gives no description
pub const GENERIC_FAILURE: &str = "Failed to send message";

// ============================================================================
// Request / Result
// ============================================================================

/// A message with fully resolved credentials.
///
/// Only [`NotificationRequest::new`] creates one, so every instance has a
/// non-empty bot token, chat id and message.
#[derive(Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    message: String,
    bot_token: String,
    chat_id: String,
}

impl NotificationRequest {
    /// Validates the resolved inputs.
    ///
    /// Checks run in field order (bot token, chat id, message) and stop at the
    /// first violation.
    pub fn new(
        message: impl Into<String>,
        bot_token: Option<String>,
        chat_id: Option<String>,
    ) -> NotifyResult<Self> {
        let bot_token = bot_token.filter(|token| !token.is_empty()).ok_or_else(|| {
            NotifyError::invalid_argument(
                "bot_token",
                "TELEGRAM_BOT_TOKEN is required (env or options)",
            )
        })?;

        let chat_id = chat_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            NotifyError::invalid_argument("chat_id", "TELEGRAM_CHAT_ID is required (env or options)")
        })?;

        let message = message.into();
        if message.is_empty() {
            return Err(NotifyError::invalid_argument(
                "message",
                "message must be a non-empty string",
            ));
        }

        Ok(Self {
            message,
            bot_token,
            chat_id,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// JSON body for `sendMessage`
    pub fn payload(&self) -> SendMessagePayload<'_> {
        SendMessagePayload {
            chat_id: &self.chat_id,
            text: &self.message,
            parse_mode: PARSE_MODE_HTML,
        }
    }
}

impl fmt::Debug for NotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRequest")
            .field("message", &self.message)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Outcome handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    pub success: bool,
    pub message: String,
}

impl NotificationResult {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Request body of `POST /bot{token}/sendMessage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendMessagePayload<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

/// The parts of a Bot API reply that decide the outcome.
///
/// `ok` follows loose truthiness: `true`, non-zero numbers, non-empty strings,
/// arrays and objects count as success. A truthy `description` that is not a
/// string is kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiReply {
    pub ok: bool,
    pub description: Option<String>,
}

impl ApiReply {
    /// A `null` body has no fields at all; callers reject it before this point.
    pub fn from_json(value: &JsonValue) -> Self {
        let JsonValue::Object(fields) = value else {
            return Self::default();
        };

        Self {
            ok: fields.get("ok").is_some_and(is_truthy),
            description: fields
                .get("description")
                .filter(|d| is_truthy(d))
                .map(|d| match d {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                }),
        }
    }

    /// Rejection text: Telegram's description or the generic fallback
    pub fn failure_message(&self) -> &str {
        self.description.as_deref().unwrap_or(GENERIC_FAILURE)
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
