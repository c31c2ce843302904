//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::NotifyOptions;

/// Send a Telegram notification from the command line
#[derive(Parser, Debug)]
#[command(name = "tg-notify")]
#[command(about = "Send a Telegram notification through the Bot API")]
#[command(long_about = "
tg-notify sends one text message to a Telegram chat via the Bot API
`sendMessage` method. Messages use Telegram's HTML markup (<b>, <i>, <code>).

Credentials are taken from, in order: command-line flags, the configuration
file / TGNOTIFY_TELEGRAM__* variables, then TELEGRAM_BOT_TOKEN and
TELEGRAM_CHAT_ID. A .env file in the working directory is loaded first.

EXAMPLES:
    # Send a message using credentials from the environment
    tg-notify send '<b>Build</b> finished'

    # Read the message from stdin
    echo 'disk almost full' | tg-notify send -

    # Override the destination chat
    tg-notify send --chat-id -1001234567890 'hello'

    # Send the built-in smoke-test message
    tg-notify test

    # Show which credentials would be used, without sending anything
    tg-notify check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// TOML file with [telegram] and [logger] sections. Defaults to
    /// config/default.toml when present.
    ///
    /// Example: --config /etc/tg-notify.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a message
    ///
    /// Examples:
    ///   tg-notify send 'Backup <b>done</b>'
    ///   tg-notify send --json 'hello'
    ///   cat report.txt | tg-notify send
    Send {
        /// Message text; `-` or omitted reads stdin
        #[arg(value_name = "MESSAGE")]
        message: Option<String>,

        #[command(flatten)]
        credentials: CredentialArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send a fixed test message to verify the setup
    Test {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Show the resolved configuration and credentials without sending
    Check {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

/// Per-invocation credential overrides
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Bot token (overrides config and TELEGRAM_BOT_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub bot_token: Option<String>,

    /// Destination chat id (overrides config and TELEGRAM_CHAT_ID)
    #[arg(long, value_name = "CHAT_ID", allow_hyphen_values = true)]
    pub chat_id: Option<String>,
}

impl From<&CredentialArgs> for NotifyOptions {
    fn from(args: &CredentialArgs) -> Self {
        NotifyOptions {
            bot_token: args.bot_token.clone(),
            chat_id: args.chat_id.clone(),
        }
    }
}

impl Cli {
    /// Log level forced by `--verbose` / `--quiet`
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Credential flags of whichever subcommand was given
    pub fn credentials(&self) -> &CredentialArgs {
        match &self.command {
            Commands::Send { credentials, .. }
            | Commands::Test { credentials }
            | Commands::Check { credentials } => credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["tg-notify", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["tg-notify", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["tg-notify"]).is_err());
    }

    #[test]
    fn test_send_command() {
        let cli = Cli::try_parse_from([
            "tg-notify",
            "send",
            "--bot-token",
            "123:abc",
            "--chat-id",
            "-1001234",
            "--json",
            "<b>hi</b>",
        ])
        .unwrap();

        match cli.command {
            Commands::Send {
                message,
                credentials,
                json,
            } => {
                assert_eq!(message.as_deref(), Some("<b>hi</b>"));
                assert_eq!(credentials.bot_token.as_deref(), Some("123:abc"));
                assert_eq!(credentials.chat_id.as_deref(), Some("-1001234"));
                assert!(json);
            }
            other => panic!("Expected Send command, got {other:?}"),
        }
    }

    #[test]
    fn test_send_without_message_reads_stdin() {
        let cli = Cli::try_parse_from(["tg-notify", "send"]).unwrap();
        assert!(matches!(cli.command, Commands::Send { message: None, .. }));
    }

    #[test]
    fn test_credentials_into_options() {
        let cli = Cli::try_parse_from(["tg-notify", "check", "--chat-id", "42"]).unwrap();
        let options = NotifyOptions::from(cli.credentials());
        assert_eq!(options.bot_token, None);
        assert_eq!(options.chat_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_log_level_override() {
        let cli = Cli::try_parse_from(["tg-notify", "-v", "test"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("debug"));

        let cli = Cli::try_parse_from(["tg-notify", "--quiet", "test"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("error"));

        let cli = Cli::try_parse_from(["tg-notify", "test"]).unwrap();
        assert_eq!(cli.log_level_override(), None);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["tg-notify", "--verbose", "--quiet", "check"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_missing_config_file_rejected() {
        let result = Cli::try_parse_from(["tg-notify", "--config", "/definitely/not/here.toml", "check"]);
        assert!(result.is_err());
    }
}
