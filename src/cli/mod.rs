//! Command-line interface for strata.
//!
//! One module per subcommand, each taking its parsed arguments plus the
//! loaded configuration; flags always win over config values.

use crate::archiver::{Archiver, Compression};
use crate::config::Config;
use crate::engine::BackupEngine;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod create;
pub mod list;
pub mod remove;
pub mod restore;
pub mod show;

/// strata - chained incremental backups on top of GNU tar
#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Chained incremental backup manager driving GNU tar listed-incremental archives")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Config file path (default: ~/.config/strata/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable quiet mode (reduce output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a full or incremental backup
    Create(create::CreateArgs),
    /// List the backup tree under the destination
    List(list::ListArgs),
    /// Show archive details for one backup
    Show(show::ShowArgs),
    /// Restore a backup chain into a target directory
    Restore(restore::RestoreArgs),
    /// Remove a backup and everything nested under it
    Remove(remove::RemoveArgs),
}

/// Output rendering for list/show.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Assemble an engine from a flag-level destination/compression override and
/// the config defaults.
pub(crate) fn build_engine(
    destination: Option<PathBuf>,
    compression: Option<Compression>,
    config: &Config,
) -> anyhow::Result<BackupEngine> {
    let destination = destination
        .or_else(|| config.destination.clone())
        .context("no destination directory; pass --destination or set it in the config file")?;
    let compression = compression
        .or(config.compression)
        .unwrap_or_default();
    let archiver = match &config.tar_binary {
        Some(binary) => Archiver::with_binary(binary.clone(), compression),
        None => Archiver::new(compression),
    };
    Ok(BackupEngine::new(destination, archiver))
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
