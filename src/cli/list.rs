//! List command implementation.

use crate::cli::{build_engine, OutputFormat};
use crate::config::Config;
use crate::walk::TreeEntry;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// Backup destination root
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ListEntry {
    path: PathBuf,
    depth: usize,
    level: Option<u32>,
    error: Option<String>,
}

impl From<&TreeEntry> for ListEntry {
    fn from(entry: &TreeEntry) -> Self {
        Self {
            path: entry.path.clone(),
            depth: entry.depth,
            level: entry.node.as_ref().ok().map(|n| n.level),
            error: entry.node.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Run the list command
pub fn run(args: ListArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(args.destination, None, config)?;
    let entries = engine.list()?;

    match args.format {
        OutputFormat::Json => {
            let entries: Vec<ListEntry> = entries.iter().map(ListEntry::from).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("No backups found under {}", engine.destination().display());
                return Ok(());
            }
            for entry in &entries {
                let indent = "  ".repeat(entry.depth);
                let name = entry
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| entry.path.display().to_string());
                match &entry.node {
                    Ok(node) => println!("{indent}{name}  [level {}]", node.level),
                    Err(e) => println!("{indent}{name}  [invalid: {e}]"),
                }
            }
        }
    }

    Ok(())
}
