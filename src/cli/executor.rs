//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::io::{Read, Write};

use anyhow::Context;

use super::handlers::{CheckCommandHandler, SendCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{NotifyOptions, Settings};
use crate::services::TelegramNotifier;

/// Execute a CLI command with the given settings
///
/// Credential flags win over the `[telegram]` section, which wins over
/// `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`.
///
/// # Errors
/// Returns errors from command handlers; notifier failures are passed
/// through unchanged.
pub async fn execute_command(
    cli: &Cli,
    settings: &Settings,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let options = NotifyOptions::from(cli.credentials()).or(settings.telegram.credential_overrides());
    let notifier = TelegramNotifier::from_settings(&settings.telegram)?;

    match &cli.command {
        Commands::Send { message, json, .. } => {
            let message = read_message(message.as_deref(), input)?;
            SendCommandHandler::new(Box::new(notifier), options)
                .execute(&message, *json, out)
                .await?;
        }
        Commands::Test { .. } => {
            SendCommandHandler::new(Box::new(notifier), options)
                .execute_test(out)
                .await?;
        }
        Commands::Check { .. } => {
            CheckCommandHandler::new(notifier, options)
                .execute(settings, out)
                .await?;
        }
    }

    Ok(())
}

/// Message text from the argument, or from `input` when it is `-` or absent.
///
/// One trailing newline (`\n` or `\r\n`) is stripped from piped input.
pub fn read_message(arg: Option<&str>, input: &mut dyn Read) -> anyhow::Result<String> {
    match arg {
        Some(message) if message != "-" => Ok(message.to_string()),
        _ => {
            let mut buffer = String::new();
            input
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;

            if buffer.ends_with('\n') {
                buffer.pop();
                if buffer.ends_with('\r') {
                    buffer.pop();
                }
            }
            Ok(buffer)
        }
    }
}
