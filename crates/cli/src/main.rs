//! Admin command line for the Gorbage Hands season program.

use std::path::PathBuf;

use clap::Parser;
use commands::{Command, CommandClient, Commands, Context};
use config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Command-line interface for the season program.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file to use.
    #[arg(long, short = 'c', env = "GHSOL_CONFIG", global = true)]
    config: Option<PathBuf>,
    /// Print debug logs.
    #[arg(long, global = true)]
    verbose: bool,
    /// Overrides for the config.
    #[command(flatten)]
    overrides: Config,
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    async fn execute(&self) -> eyre::Result<()> {
        let config = Config::load(self.config.as_ref(), &self.overrides)?;
        let client = if self.command.is_client_required() {
            Some(CommandClient::new(&config)?)
        } else {
            None
        };
        self.command
            .execute(Context::new(&config, client.as_ref(), self.verbose))
            .await
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_directive = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    cli.execute().await
}
