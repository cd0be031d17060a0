//! Error types for strata

use std::path::PathBuf;
use thiserror::Error;

/// Why a single directory failed to qualify as a backup node.
///
/// These are recoverable: the tree walker records them inline and keeps
/// traversing, so one corrupted backup never hides the rest of the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("no archive file found")]
    NoArchiveFound,

    #[error("multiple archive files present")]
    AmbiguousArchive,

    #[error("no snapshot file found")]
    NoSnapshotFound,

    #[error("multiple snapshot files present")]
    AmbiguousSnapshot,

    #[error("snapshot filename {name:?} does not encode a backup level")]
    InvalidLevelFormat { name: String },

    #[error("directory not readable: {reason}")]
    Unreadable { reason: String },
}

/// Main error type for strata operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    InvalidNode { path: PathBuf, source: NodeError },

    #[error("destination {} is not readable: {source}", .path.display())]
    DestinationUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no backup named {name:?} found under the destination")]
    ParentNotFound { name: String },

    #[error("backup name {name:?} is ambiguous, candidates:\n{}", format_candidates(.candidates))]
    AmbiguousParent {
        name: String,
        candidates: Vec<PathBuf>,
    },

    #[error(
        "broken backup chain at {}: expected level {expected}, found {}",
        .dir.display(),
        format_level(.found)
    )]
    BrokenChain {
        dir: PathBuf,
        expected: u32,
        found: Option<u32>,
    },

    #[error("archiver exited with {}: {stderr}", format_exit_code(.code))]
    ArchiverFailed { code: Option<i32>, stderr: String },

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },
}

/// Result type alias for strata operations
pub type Result<T> = std::result::Result<T, Error>;

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_level(level: &Option<u32>) -> String {
    match level {
        Some(level) => format!("level {level}"),
        None => "no valid backup".to_string(),
    }
}

fn format_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}
