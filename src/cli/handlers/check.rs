//! Check command handler
//!
//! Reports the resolved configuration without contacting Telegram.

use std::io::Write;

use crate::config::{BOT_TOKEN_ENV, CHAT_ID_ENV, NotifyOptions, Settings};
use crate::services::{NotificationProvider, TelegramNotifier};

/// Handler for the check command
pub struct CheckCommandHandler {
    notifier: TelegramNotifier,
    options: NotifyOptions,
}

impl CheckCommandHandler {
    pub fn new(notifier: TelegramNotifier, options: NotifyOptions) -> Self {
        Self { notifier, options }
    }

    /// Print the resolved settings to `out`
    ///
    /// # Errors
    /// - Invalid API base URL
    /// - Missing bot token or chat id
    pub async fn execute(&self, settings: &Settings, out: &mut dyn Write) -> anyhow::Result<()> {
        settings.validate()?;
        self.notifier.validate_config().await?;
        writeln!(out, "✓ Configuration is valid")?;
        writeln!(out, "✓ API endpoint: {}", self.notifier.api_base_url())?;
        writeln!(
            out,
            "✓ Timeouts: {}s request, {}s connect",
            settings.telegram.timeout_seconds, settings.telegram.connect_timeout_seconds
        )?;

        let resolved = self.notifier.resolve_credentials(&self.options);

        match resolved.masked_bot_token() {
            Some(masked) => writeln!(out, "✓ Bot token: {masked}")?,
            None => writeln!(out, "✗ Bot token: not set ({BOT_TOKEN_ENV})")?,
        }
        match resolved.chat_id.as_deref() {
            Some(chat_id) => writeln!(out, "✓ Chat id: {chat_id}")?,
            None => writeln!(out, "✗ Chat id: not set ({CHAT_ID_ENV})")?,
        }

        if !resolved.is_complete() {
            anyhow::bail!("Telegram credentials are incomplete");
        }

        writeln!(out, "Ready to send")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn notifier(pairs: &[(&str, &str)]) -> TelegramNotifier {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TelegramNotifier::builder().credentials(source).build().unwrap()
    }

    #[tokio::test]
    async fn test_check_complete_credentials() {
        let handler = CheckCommandHandler::new(
            notifier(&[(BOT_TOKEN_ENV, "123456:secret-part"), (CHAT_ID_ENV, "42")]),
            NotifyOptions::default(),
        );
        let mut out = Vec::new();

        handler.execute(&Settings::default(), &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("✓ Bot token: 123456:***"));
        assert!(printed.contains("✓ Chat id: 42"));
        assert!(printed.contains("https://api.telegram.org"));
        assert!(!printed.contains("secret-part"));
    }

    #[tokio::test]
    async fn test_check_uses_overrides() {
        let handler = CheckCommandHandler::new(
            notifier(&[(BOT_TOKEN_ENV, "1:env"), (CHAT_ID_ENV, "env-chat")]),
            NotifyOptions::new().with_chat_id("-100777"),
        );
        let mut out = Vec::new();

        handler.execute(&Settings::default(), &mut out).await.unwrap();

        assert!(String::from_utf8(out).unwrap().contains("✓ Chat id: -100777"));
    }

    #[tokio::test]
    async fn test_check_missing_chat_id_fails() {
        let handler = CheckCommandHandler::new(
            notifier(&[(BOT_TOKEN_ENV, "1:token")]),
            NotifyOptions::default(),
        );
        let mut out = Vec::new();

        let err = handler.execute(&Settings::default(), &mut out).await.unwrap_err();

        assert_eq!(err.to_string(), "Telegram credentials are incomplete");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("✗ Chat id: not set (TELEGRAM_CHAT_ID)"));
        assert!(!printed.contains("Ready to send"));
    }

    #[tokio::test]
    async fn test_check_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.telegram.timeout_seconds = 0;
        let handler = CheckCommandHandler::new(notifier(&[]), NotifyOptions::default());

        assert!(handler.execute(&settings, &mut Vec::new()).await.is_err());
    }
}
