//! Snapshot and archive filename conventions.
//!
//! A backup directory holds exactly one archive (`archive.tar.gz` or
//! `archive.tar.bz2`) and exactly one snapshot state file whose name encodes
//! the incremental level, e.g. `level0.snapshot` for a full backup.

use crate::error::NodeError;

/// Prefix of every snapshot state filename.
pub const SNAPSHOT_PREFIX: &str = "level";

/// Extension of every snapshot state filename.
pub const SNAPSHOT_EXTENSION: &str = "snapshot";

/// Stem shared by all archive filenames; the compression decides the rest.
pub const ARCHIVE_STEM: &str = "archive.tar";

/// Canonical snapshot filename for a backup at `level`.
pub fn snapshot_file_name(level: u32) -> String {
    format!("{SNAPSHOT_PREFIX}{level}.{SNAPSHOT_EXTENSION}")
}

/// Decode the incremental level embedded in a snapshot filename.
///
/// Inverse of [`snapshot_file_name`]. Fails when the name does not carry a
/// non-negative decimal integer between the prefix and the extension.
pub fn parse_snapshot_level(name: &str) -> std::result::Result<u32, NodeError> {
    let invalid = || NodeError::InvalidLevelFormat {
        name: name.to_string(),
    };

    let stem = name.strip_suffix(SNAPSHOT_EXTENSION).ok_or_else(invalid)?;
    let stem = stem.strip_suffix('.').ok_or_else(invalid)?;
    let digits = stem.strip_prefix(SNAPSHOT_PREFIX).ok_or_else(invalid)?;
    digits.parse::<u32>().map_err(|_| invalid())
}

/// Whether a filename is snapshot-shaped, whatever its level spells.
pub fn is_snapshot_name(name: &str) -> bool {
    name.strip_suffix(SNAPSHOT_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Whether a filename is one of the canonical archive names.
pub fn is_archive_name(name: &str) -> bool {
    name.strip_prefix(ARCHIVE_STEM)
        .is_some_and(|rest| matches!(rest, ".gz" | ".bz2"))
}
