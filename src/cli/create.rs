//! Create command implementation.

use crate::archiver::Compression;
use crate::cli::build_engine;
use crate::config::Config;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BackupKind {
    /// Level-0 backup in a fresh directory under the destination
    Full,
    /// Next-level backup nested under an existing parent
    Incremental,
}

/// Arguments for the create command
#[derive(Args)]
pub struct CreateArgs {
    /// Kind of backup to create
    #[arg(value_enum)]
    pub kind: BackupKind,

    /// Directory to back up
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Backup destination root
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Parent backup for incrementals: a path or a directory name
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Archive compression
    #[arg(short, long, value_enum)]
    pub compression: Option<Compression>,
}

/// Run the create command
pub fn run(args: CreateArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(args.destination, args.compression, config)?;
    let source = args
        .source
        .or_else(|| config.source.clone())
        .context("no source directory; pass --source or set it in the config file")?;

    let node = match args.kind {
        BackupKind::Full => engine.create_full(&source)?,
        BackupKind::Incremental => {
            let parent = args
                .parent
                .or_else(|| config.parent.clone())
                .context("incremental backups need a parent; pass --parent or set it in the config file")?;
            engine.create_incremental(&parent, &source)?
        }
    };

    println!(
        "Created level {} backup: {}",
        node.level,
        node.path.display()
    );
    Ok(())
}
