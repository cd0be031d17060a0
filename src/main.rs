//! strata - chained incremental backup manager
//!
//! Main binary entry point for the command-line interface.

use anyhow::Context;
use clap::Parser;
use strata::cli::{Cli, Commands, LogFormat};
use strata::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    let config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Create(args) => strata::cli::create::run(args, &config),
        Commands::List(args) => strata::cli::list::run(args, &config),
        Commands::Show(args) => strata::cli::show::run(args, &config),
        Commands::Restore(args) => strata::cli::restore::run(args, &config),
        Commands::Remove(args) => strata::cli::remove::run(args, &config),
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet { Level::WARN } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match cli.log_format {
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        }
    }
}
