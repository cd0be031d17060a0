//! Reading a single directory as a backup node.

use crate::error::NodeError;
use crate::naming;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One backup unit on disk: a directory holding exactly one archive and one
/// level-encoded snapshot file.
///
/// The parent of an incremental node is structural, not stored: a level-N
/// backup always lives physically nested inside its level-(N-1) parent's
/// directory, so walking up one directory level finds the parent.
///
/// Values are immutable snapshots of filesystem state at read time; nothing
/// is cached across reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupNode {
    /// Directory owning this backup's files.
    pub path: PathBuf,
    /// Incremental level: 0 is a full backup, N>0 an incremental at depth N.
    pub level: u32,
    /// The exactly-one archive file in `path`.
    pub archive_path: PathBuf,
    /// The exactly-one snapshot file in `path`; its name encodes `level`.
    pub snapshot_path: PathBuf,
}

/// Per-directory read outcome, recoverable by callers.
pub type NodeResult = std::result::Result<BackupNode, NodeError>;

impl BackupNode {
    /// Inspect `dir` and return its backup node, or the reason it is not one.
    ///
    /// Only the directory's immediate file entries are considered; this never
    /// recurses and never writes.
    pub fn read(dir: &Path) -> NodeResult {
        BackupFiles::scan(dir)?.into_node(dir)
    }

    /// Whether this is a full (level 0) backup.
    pub fn is_full(&self) -> bool {
        self.level == 0
    }

    /// The directory basename users refer to this backup by.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Archive- and snapshot-shaped files found in one directory listing.
#[derive(Debug)]
pub(crate) struct BackupFiles {
    archives: Vec<PathBuf>,
    snapshots: Vec<PathBuf>,
}

impl BackupFiles {
    /// List `dir`'s immediate file entries once, keeping only the names that
    /// matter to the backup layout.
    pub(crate) fn scan(dir: &Path) -> std::result::Result<Self, NodeError> {
        let unreadable = |e: std::io::Error| NodeError::Unreadable {
            reason: e.to_string(),
        };

        let mut archives = Vec::new();
        let mut snapshots = Vec::new();

        for entry in fs::read_dir(dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            if !entry.file_type().map_err(unreadable)?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if naming::is_archive_name(name) {
                archives.push(entry.path());
            } else if naming::is_snapshot_name(name) {
                snapshots.push(entry.path());
            }
        }

        Ok(Self {
            archives,
            snapshots,
        })
    }

    /// Neither archive nor snapshot files: not a backup directory at all.
    pub(crate) fn is_empty(&self) -> bool {
        self.archives.is_empty() && self.snapshots.is_empty()
    }

    /// Enforce the exactly-one-of-each invariant and decode the level.
    pub(crate) fn into_node(mut self, dir: &Path) -> NodeResult {
        let archive_path = match self.archives.len() {
            0 => return Err(NodeError::NoArchiveFound),
            1 => self.archives.remove(0),
            _ => return Err(NodeError::AmbiguousArchive),
        };
        let snapshot_path = match self.snapshots.len() {
            0 => return Err(NodeError::NoSnapshotFound),
            1 => self.snapshots.remove(0),
            _ => return Err(NodeError::AmbiguousSnapshot),
        };

        let snapshot_name = snapshot_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let level = naming::parse_snapshot_level(&snapshot_name)?;

        Ok(BackupNode {
            path: dir.to_path_buf(),
            level,
            archive_path,
            snapshot_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn backup_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            File::create(dir.path().join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn valid_full_backup_reads_as_level_zero() {
        let dir = backup_dir(&["archive.tar.gz", "level0.snapshot"]);
        let node = BackupNode::read(dir.path()).unwrap();
        assert_eq!(node.level, 0);
        assert!(node.is_full());
        assert_eq!(node.archive_path, dir.path().join("archive.tar.gz"));
        assert_eq!(node.snapshot_path, dir.path().join("level0.snapshot"));
    }

    #[test]
    fn bzip2_archives_are_recognized() {
        let dir = backup_dir(&["archive.tar.bz2", "level3.snapshot"]);
        let node = BackupNode::read(dir.path()).unwrap();
        assert_eq!(node.level, 3);
        assert!(!node.is_full());
    }

    #[test]
    fn missing_archive_is_reported() {
        let dir = backup_dir(&["level0.snapshot"]);
        assert_eq!(BackupNode::read(dir.path()), Err(NodeError::NoArchiveFound));
    }

    #[test]
    fn missing_snapshot_is_reported() {
        let dir = backup_dir(&["archive.tar.gz"]);
        assert_eq!(
            BackupNode::read(dir.path()),
            Err(NodeError::NoSnapshotFound)
        );
    }

    #[test]
    fn two_snapshots_are_ambiguous() {
        let dir = backup_dir(&["archive.tar.gz", "level0.snapshot", "level1.snapshot"]);
        assert_eq!(
            BackupNode::read(dir.path()),
            Err(NodeError::AmbiguousSnapshot)
        );
    }

    #[test]
    fn two_archives_are_ambiguous() {
        let dir = backup_dir(&["archive.tar.gz", "archive.tar.bz2", "level0.snapshot"]);
        assert_eq!(
            BackupNode::read(dir.path()),
            Err(NodeError::AmbiguousArchive)
        );
    }

    #[test]
    fn undecodable_snapshot_name_is_reported() {
        let dir = backup_dir(&["archive.tar.gz", "levelx.snapshot"]);
        assert_eq!(
            BackupNode::read(dir.path()),
            Err(NodeError::InvalidLevelFormat {
                name: "levelx.snapshot".to_string()
            })
        );
    }

    #[test]
    fn nested_directories_do_not_count_as_files() {
        let dir = backup_dir(&["archive.tar.gz", "level0.snapshot"]);
        std::fs::create_dir(dir.path().join("archive.tar.bz2.d")).unwrap();
        std::fs::create_dir(dir.path().join("child-incremental")).unwrap();
        File::create(dir.path().join("child-incremental").join("level1.snapshot")).unwrap();

        let node = BackupNode::read(dir.path()).unwrap();
        assert_eq!(node.level, 0);
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = backup_dir(&["archive.tar.gz", "level0.snapshot", "notes.txt", "backup.log"]);
        assert!(BackupNode::read(dir.path()).is_ok());
    }

    #[test]
    fn missing_directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("never-created");
        assert!(matches!(
            BackupNode::read(&gone),
            Err(NodeError::Unreadable { .. })
        ));
    }
}
