//! Show command implementation.

use crate::cli::{build_engine, format_bytes, OutputFormat};
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Backup to show: a path or a directory name
    pub reference: String,

    /// Backup destination root
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Run the show command
pub fn run(args: ShowArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(args.destination, None, config)?;
    let report = engine.show(&args.reference)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            println!("Backup Details:");
            println!("  Directory: {}", report.path.display());
            println!("  Level:     {}", report.level);
            println!("  Archive:   {}", report.archive_path.display());
            println!("  Size:      {}", format_bytes(report.archive_size));
            println!("  Modified:  {}", report.modified.format("%Y-%m-%d %H:%M:%S"));
        }
    }

    Ok(())
}
