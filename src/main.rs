use std::process::ExitCode;

use clap::Parser;
use tg_notify::cli::{Cli, execute_command, init_logger_from_settings, load_settings};

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli)?;
    init_logger_from_settings(&settings, cli.log_level_override())?;

    tracing::debug!(
        version = %settings.application.version,
        config_file = ?cli.config,
        "Starting tg-notify"
    );

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    execute_command(cli, &settings, &mut stdin, &mut stdout).await
}
