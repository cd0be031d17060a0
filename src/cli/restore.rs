//! Restore command implementation.

use crate::cli::build_engine;
use crate::config::Config;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the restore command
#[derive(Args)]
pub struct RestoreArgs {
    /// Backup to restore: a path or a directory name
    pub reference: String,

    /// Directory to extract the chain into
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Backup destination root
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Run the restore command
pub fn run(args: RestoreArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(args.destination, None, config)?;
    let target = args
        .target
        .or_else(|| config.restore_target.clone())
        .context("no restore target; pass --target or set restore_target in the config file")?;

    let chain = engine.plan_restore(&args.reference)?;

    println!("Restore plan for {}:", chain.target().name());
    for node in &chain {
        println!("  level {}: {}", node.level, node.path.display());
    }

    if !args.force {
        println!(
            "This will extract {} archive(s) into {}, overwriting existing files. Continue? (y/N)",
            chain.len(),
            target.display()
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().to_lowercase().starts_with('y') {
            println!("Cancelled");
            return Ok(());
        }
    }

    engine.restore_chain(&chain, &target)?;
    println!(
        "Restored {} level(s) into {}",
        chain.len(),
        target.display()
    );

    Ok(())
}
