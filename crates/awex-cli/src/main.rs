use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use awex_cli::commands::{buckets, export};
use awex_cli::{Cli, Commands, Config};
use awex_client::AwClient;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let client = AwClient::new(&config.base_url, Duration::from_secs(config.timeout_secs))
        .context("failed to build HTTP client")?;

    let mut out = stdout().lock();
    match &cli.command {
        Some(Commands::Export { policy, output }) => {
            export::run(&mut out, &client, &config, *policy, output.as_deref())?;
        }
        Some(Commands::Buckets) => {
            buckets::run(&mut out, &client)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
