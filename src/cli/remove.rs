//! Remove command implementation.

use crate::cli::build_engine;
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the remove command
#[derive(Args)]
pub struct RemoveArgs {
    /// Backup to remove: a path or a directory name
    pub reference: String,

    /// Backup destination root
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Run the remove command
pub fn run(args: RemoveArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(args.destination, None, config)?;
    let node = engine.resolve(&args.reference)?;

    if !args.force {
        println!(
            "Remove {} and every backup nested under it? This cannot be undone. (y/N)",
            node.path.display()
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().to_lowercase().starts_with('y') {
            println!("Cancelled");
            return Ok(());
        }
    }

    engine.remove(&node)?;
    println!("Removed {}", node.path.display());

    Ok(())
}
