//! Studyshare - command-line client for the Studyshare course material service
//!
#![doc = "Main entry point for the studyshare binary."]

use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studyshare::cli::Cli;
use studyshare::commands::{self, Context};
use studyshare::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Command failed: {:?}", err);
            eprintln!("{} {}", "Error:".red().bold(), commands::user_message(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;
    tracing::debug!("Using backend {}", config.api.base_url);

    let mut ctx = Context::from_config(&config)?;
    commands::run(&mut ctx, cli.command).await
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "studyshare=debug"
    } else {
        "studyshare=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
