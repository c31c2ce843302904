//! Send and test command handler

use std::io::Write;

use crate::config::NotifyOptions;
use crate::models::NotificationResult;
use crate::services::NotificationProvider;

/// Message sent by `tg-notify test`
pub const TEST_MESSAGE: &str =
    "✅ <b>Test successful!</b>\n\nYour Telegram notifier is working perfectly.";

/// Handler for the send and test commands
pub struct SendCommandHandler {
    provider: Box<dyn NotificationProvider>,
    options: NotifyOptions,
}

impl SendCommandHandler {
    pub fn new(provider: Box<dyn NotificationProvider>, options: NotifyOptions) -> Self {
        Self { provider, options }
    }

    /// Send `message` and report the result on `out`
    ///
    /// # Errors
    /// Any notifier failure, unchanged, plus write errors on `out`
    pub async fn execute(
        &self,
        message: &str,
        json: bool,
        out: &mut dyn Write,
    ) -> anyhow::Result<NotificationResult> {
        self.provider.validate_config().await?;

        tracing::info!(provider = self.provider.name(), "Sending notification");
        let result = self.provider.send(message, &self.options).await?;

        if json {
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
        } else {
            writeln!(out, "✅ Success: {}", result.message)?;
        }

        Ok(result)
    }

    /// Send [`TEST_MESSAGE`]
    pub async fn execute_test(&self, out: &mut dyn Write) -> anyhow::Result<NotificationResult> {
        writeln!(out, "🚀 Sending test notification...")?;
        self.execute(TEST_MESSAGE, false, out).await
    }
}
