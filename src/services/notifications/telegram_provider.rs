//! Telegram notification provider implementation.
//!
//! Sends a text message through the Bot API `sendMessage` method.
//!
//! Telegram Bot API Reference: https://core.telegram.org/bots/api#sendmessage

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};

use super::provider::NotificationProvider;
use crate::config::{CredentialSource, NotifyOptions, ProcessEnv, ResolvedCredentials, TelegramSettings};
use crate::error::{NotifyError, NotifyResult};
use crate::external::client::{HttpTimeouts, build_http_client};
use crate::models::{ApiReply, NotificationRequest, NotificationResult};

/// Production Bot API endpoint
pub const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Telegram notification provider
///
/// Credentials are resolved per call: the override in [`NotifyOptions`] wins,
/// otherwise `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` are read from the
/// configured [`CredentialSource`] (the process environment by default).
///
/// Cloning is cheap and clones share nothing observable; concurrent sends are
/// independent.
///
/// # Example
/// ```ignore
/// let notifier = TelegramNotifier::new()?;
/// let result = notifier
///     .send("✅ <b>Deploy finished</b>", &NotifyOptions::default())
///     .await?;
/// assert!(result.success);
/// ```
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl TelegramNotifier {
    /// Notifier for the production API with default timeouts
    pub fn new() -> NotifyResult<Self> {
        Self::builder().build()
    }

    pub fn builder() -> TelegramNotifierBuilder {
        TelegramNotifierBuilder::default()
    }

    /// Notifier configured from the `[telegram]` settings section.
    ///
    /// Credentials in `settings` are not captured here; pass them per call
    /// via [`TelegramSettings::credential_overrides`].
    pub fn from_settings(settings: &TelegramSettings) -> NotifyResult<Self> {
        Self::builder()
            .api_base_url(settings.api_base_url.as_str())
            .timeouts(HttpTimeouts::from(settings))
            .build()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Applies the override-then-source rule without validating anything
    pub fn resolve_credentials(&self, options: &NotifyOptions) -> ResolvedCredentials {
        options.resolve(self.credentials.as_ref())
    }

    /// Resolves credentials and validates the inputs. No I/O.
    pub fn prepare(&self, message: &str, options: &NotifyOptions) -> NotifyResult<NotificationRequest> {
        let resolved = self.resolve_credentials(options);
        NotificationRequest::new(message, resolved.bot_token, resolved.chat_id)
    }

    /// Sends `message`, resolving credentials from `options` and the source.
    ///
    /// Invalid input fails before any connection is opened. Otherwise exactly
    /// one request is made; nothing is retried.
    pub async fn send(&self, message: &str, options: &NotifyOptions) -> NotifyResult<NotificationResult> {
        let request = self.prepare(message, options)?;
        self.send_request(&request).await
    }

    /// Sends an already validated request
    pub async fn send_request(&self, request: &NotificationRequest) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let body = serde_json::to_vec(&request.payload())
            .map_err(|e| NotifyError::invalid_argument("message", e.to_string()))?;

        tracing::debug!(
            chat_id = request.chat_id(),
            body_bytes = body.len(),
            "Sending Telegram message"
        );

        let outcome = self.dispatch(request.bot_token(), body).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Ok(_) => tracing::debug!(chat_id = request.chat_id(), duration_ms, "Telegram message sent"),
            Err(e) => tracing::debug!(
                chat_id = request.chat_id(),
                duration_ms,
                error = %e,
                "Telegram message failed"
            ),
        }

        outcome
    }

    async fn dispatch(&self, bot_token: &str, body: Vec<u8>) -> NotifyResult<NotificationResult> {
        // reqwest derives Content-Length from the byte body
        let response = self
            .client
            .post(self.endpoint(bot_token))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        interpret_response(status, &body)
    }

    fn endpoint(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url, bot_token)
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

/// Maps a Bot API reply onto the caller-facing outcome.
///
/// Success needs both status 200 and a truthy `ok`. A body that is not JSON, or
/// is JSON `null`, is reported as malformed regardless of status.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> NotifyResult<NotificationResult> {
    let json: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| NotifyError::malformed_response(e.to_string()))?;

    if json.is_null() {
        return Err(NotifyError::malformed_response("response body is null"));
    }

    let reply = ApiReply::from_json(&json);

    if status == StatusCode::OK && reply.ok {
        Ok(NotificationResult::sent())
    } else {
        Err(NotifyError::remote_rejection(reply.failure_message()))
    }
}

#[async_trait]
impl NotificationProvider for TelegramNotifier {
    async fn send(&self, message: &str, options: &NotifyOptions) -> NotifyResult<NotificationResult> {
        TelegramNotifier::send(self, message, options).await
    }

    fn name(&self) -> &'static str {
        "telegram"
    }

    /// Checks that the API base URL is an http(s) URL
    async fn validate_config(&self) -> NotifyResult<()> {
        let url = Url::parse(&self.api_base_url).map_err(|_| {
            NotifyError::invalid_argument("api_base_url", "Invalid URL format")
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(NotifyError::invalid_argument(
                "api_base_url",
                "URL must use http or https protocol",
            ));
        }

        Ok(())
    }
}

/// Builder for [`TelegramNotifier`]
pub struct TelegramNotifierBuilder {
    api_base_url: String,
    timeouts: HttpTimeouts,
    client: Option<reqwest::Client>,
    credentials: Arc<dyn CredentialSource>,
}

impl Default for TelegramNotifierBuilder {
    fn default() -> Self {
        Self {
            api_base_url: TELEGRAM_API_BASE_URL.to_string(),
            timeouts: HttpTimeouts::default(),
            client: None,
            credentials: Arc::new(ProcessEnv),
        }
    }
}

impl TelegramNotifierBuilder {
    /// Scheme and host of the Bot API. A trailing slash is ignored.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Ignored when a client is supplied with [`Self::client`]
    pub fn timeouts(mut self, timeouts: HttpTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Where missing credentials are looked up
    pub fn credentials(mut self, source: impl CredentialSource + 'static) -> Self {
        self.credentials = Arc::new(source);
        self
    }

    pub fn build(self) -> NotifyResult<TelegramNotifier> {
        let client = match self.client {
            Some(client) => client,
            None => build_http_client(self.timeouts)?,
        };

        Ok(TelegramNotifier {
            client,
            api_base_url: self.api_base_url,
            credentials: self.credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BOT_TOKEN_ENV, CHAT_ID_ENV};
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn notifier(source: HashMap<String, String>) -> TelegramNotifier {
        TelegramNotifier::builder()
            .credentials(source)
            .build()
            .unwrap()
    }

    #[test]
    fn test_endpoint() {
        let notifier = notifier(HashMap::new());
        assert_eq!(
            notifier.endpoint("123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let notifier = TelegramNotifier::builder()
            .api_base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(
            notifier.endpoint("t"),
            "http://127.0.0.1:8080/bott/sendMessage"
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = TelegramSettings {
            api_base_url: "http://localhost:9000".to_string(),
            ..Default::default()
        };
        let notifier = TelegramNotifier::from_settings(&settings).unwrap();
        assert_eq!(notifier.api_base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_prepare_uses_source_fallback() {
        let notifier = notifier(env(&[(BOT_TOKEN_ENV, "1:env"), (CHAT_ID_ENV, "99")]));
        let request = notifier.prepare("hi", &NotifyOptions::default()).unwrap();
        assert_eq!(request.bot_token(), "1:env");
        assert_eq!(request.chat_id(), "99");
    }

    #[test]
    fn test_prepare_override_wins() {
        let notifier = notifier(env(&[(BOT_TOKEN_ENV, "1:env"), (CHAT_ID_ENV, "99")]));
        let options = NotifyOptions::new().with_bot_token("2:opt").with_chat_id("7");
        let request = notifier.prepare("hi", &options).unwrap();
        assert_eq!(request.bot_token(), "2:opt");
        assert_eq!(request.chat_id(), "7");
    }

    #[test]
    fn test_prepare_missing_everything_names_bot_token() {
        let notifier = notifier(HashMap::new());
        let err = notifier.prepare("", &NotifyOptions::default()).unwrap_err();
        assert!(matches!(err, NotifyError::InvalidArgument { ref field, .. } if field == "bot_token"));
    }

    #[test]
    fn test_interpret_success() {
        let result = interpret_response(StatusCode::OK, br#"{"ok":true,"result":{"message_id":1}}"#);
        assert_eq!(result.unwrap(), NotificationResult::sent());
    }

    #[test]
    fn test_interpret_ok_false_with_description() {
        let err = interpret_response(
            StatusCode::OK,
            br#"{"ok":false,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap_err();
        assert_eq!(err, NotifyError::remote_rejection("Bad Request: chat not found"));
    }

    #[test]
    fn test_interpret_non_200_with_ok_true_is_rejected() {
        let err = interpret_response(StatusCode::CREATED, br#"{"ok":true}"#).unwrap_err();
        assert_eq!(err, NotifyError::remote_rejection("Failed to send message"));
    }

    #[test]
    fn test_interpret_error_status_description() {
        let err = interpret_response(
            StatusCode::UNAUTHORIZED,
            br#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_interpret_non_json_body() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>502</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.to_string().starts_with("Invalid response: "));
        assert!(err.to_string().len() > "Invalid response: ".len());
    }

    #[test]
    fn test_interpret_empty_body() {
        let err = interpret_response(StatusCode::OK, b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_interpret_null_body() {
        let err = interpret_response(StatusCode::OK, b"null").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.to_string(), "Invalid response: response body is null");
    }

    #[test]
    fn test_interpret_scalar_body() {
        let err = interpret_response(StatusCode::OK, b"42").unwrap_err();
        assert_eq!(err, NotifyError::remote_rejection("Failed to send message"));
    }

    #[test]
    fn test_interpret_numeric_description() {
        let err = interpret_response(StatusCode::BAD_REQUEST, br#"{"ok":false,"description":400}"#)
            .unwrap_err();
        assert_eq!(err, NotifyError::remote_rejection("400"));
    }

    #[tokio::test]
    async fn test_validate_config() {
        let notifier = notifier(HashMap::new());
        assert!(notifier.validate_config().await.is_ok());
        assert_eq!(NotificationProvider::name(&notifier), "telegram");

        let bad = TelegramNotifier::builder()
            .api_base_url("ftp://api.telegram.org")
            .build()
            .unwrap();
        assert!(bad.validate_config().await.is_err());

        let garbage = TelegramNotifier::builder().api_base_url("::::").build().unwrap();
        assert!(garbage.validate_config().await.is_err());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let notifier = notifier(env(&[(BOT_TOKEN_ENV, "1:secret")]));
        assert!(!format!("{notifier:?}").contains("secret"));
    }
}
