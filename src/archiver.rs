//! Driving the external GNU tar archiver.
//!
//! All archive I/O is delegated to tar as a synchronous subprocess; this
//! module only computes the argument vectors and surfaces failures. The
//! snapshot state file passed on creation is tar's listed-incremental
//! metadata: opaque here, except that its filename encodes the level.

use crate::error::{Error, Result};
use crate::naming::ARCHIVE_STEM;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Compression applied by the archiver, reflected in the archive filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Gzip,
    Bzip2,
}

impl Compression {
    /// The tar flag selecting this compression.
    pub fn flag(self) -> &'static str {
        match self {
            Compression::Gzip => "--gzip",
            Compression::Bzip2 => "--bzip2",
        }
    }

    /// Canonical archive filename for this compression.
    pub fn archive_file_name(self) -> String {
        match self {
            Compression::Gzip => format!("{ARCHIVE_STEM}.gz"),
            Compression::Bzip2 => format!("{ARCHIVE_STEM}.bz2"),
        }
    }
}

/// Synchronous wrapper around the tar binary.
#[derive(Debug, Clone)]
pub struct Archiver {
    binary: String,
    compression: Compression,
}

impl Archiver {
    /// An archiver invoking `tar` from `PATH`.
    pub fn new(compression: Compression) -> Self {
        Self::with_binary("tar", compression)
    }

    /// An archiver invoking a specific binary, e.g. a GNU tar installed
    /// outside `PATH`.
    pub fn with_binary(binary: impl Into<String>, compression: Compression) -> Self {
        Self {
            binary: binary.into(),
            compression,
        }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Archive `source` into `archive`, reading and updating the
    /// listed-incremental state in `snapshot`.
    ///
    /// A fresh (absent) snapshot file makes tar take a full backup; a
    /// snapshot copied forward from a parent makes it take the next
    /// incremental on top of that parent.
    pub fn create(&self, snapshot: &Path, source: &Path, archive: &Path) -> Result<()> {
        self.run(create_args(self.compression, snapshot, source, archive))
    }

    /// Extract `archive` into `target`, layering on top of whatever is
    /// already there.
    ///
    /// Incremental-aware extraction needs a listed-incremental flag even when
    /// replaying; the null snapshot tells tar to apply the member list
    /// (including recorded deletions) without consulting prior state.
    pub fn extract(&self, archive: &Path, target: &Path) -> Result<()> {
        self.run(extract_args(self.compression, archive, target))
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        debug!("running {} {:?}", self.binary, args);
        let output = Command::new(&self.binary).args(&args).output()?;
        if !output.status.success() {
            return Err(Error::ArchiverFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

fn create_args(
    compression: Compression,
    snapshot: &Path,
    source: &Path,
    archive: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--create".into(), "--listed-incremental".into()];
    args.push(snapshot.into());
    args.push(compression.flag().into());
    args.push("--file".into());
    args.push(archive.into());
    args.push("--directory".into());
    args.push(source.into());
    args.push(".".into());
    args
}

fn extract_args(compression: Compression, archive: &Path, target: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--extract".into(),
        "--listed-incremental".into(),
        "/dev/null".into(),
    ];
    args.push(compression.flag().into());
    args.push("--file".into());
    args.push(archive.into());
    args.push("--directory".into());
    args.push(target.into());
    args
}
