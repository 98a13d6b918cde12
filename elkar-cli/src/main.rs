//! Elkar CLI
//!
//! Declares the desired state of Elkarbackup clients and jobs and reconciles
//! the server against it. The result is printed on stdout; logs go to stderr.

mod commands;
mod config;
mod output;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use output::{OutputFormat, print_result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "elkar=info,elkar_reconciler=info,elkar_client=info";

#[derive(Parser)]
#[command(name = "elkar")]
#[command(about = "Elkarbackup desired-state CLI", long_about = None)]
struct Cli {
    /// Server URL without the '/api' part
    #[arg(long, env = "ELKARBACKUP_API_URL")]
    api_url: String,

    /// User for API authentication
    #[arg(long, env = "ELKARBACKUP_API_USER")]
    api_user: String,

    /// Password for API authentication
    #[arg(long, env = "ELKARBACKUP_API_PASSWORD", hide_env_values = true)]
    api_password: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "ELKARBACKUP_TIMEOUT")]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        api_user: cli.api_user,
        api_password: cli.api_password,
        timeout: cli.timeout.map(Duration::from_secs),
    };
    config.validate()?;
    tracing::debug!("Using Elkarbackup API at {}", config.api_url);

    let result = handle_command(cli.command, &config).await?;
    print_result(&result, cli.format)?;

    if result.is_failure() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
