//! Depth-first enumeration of every backup node under a destination root.

use crate::error::{Error, Result};
use crate::node::{BackupFiles, NodeResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// One directory visited during a walk.
#[derive(Debug)]
pub struct TreeEntry {
    /// Nesting depth below the destination root; 0 for top-level backups.
    pub depth: usize,
    /// The visited directory.
    pub path: PathBuf,
    /// Its backup node, or why the directory is not a valid one.
    pub node: NodeResult,
}

/// Lazy depth-first walk over a destination tree.
///
/// Yields one [`TreeEntry`] per backup-shaped directory, in filename order so
/// the timestamp-prefixed names come out chronologically. Directories holding
/// neither archive nor snapshot files are descended into but not reported.
/// Invalid nodes are reported inline and their children still visited, so a
/// corrupted full backup does not hide its incrementals.
///
/// Each walk re-reads the disk; no state survives between walks, and two
/// walks over a mutating tree may disagree.
pub struct TreeWalker {
    inner: walkdir::IntoIter,
}

impl TreeWalker {
    /// Start a walk below `destination`.
    ///
    /// Fails with [`Error::DestinationUnreadable`] when the root itself
    /// cannot be listed; anything below that is reported per entry instead.
    pub fn new(destination: &Path) -> Result<Self> {
        fs::read_dir(destination).map_err(|source| Error::DestinationUnreadable {
            path: destination.to_path_buf(),
            source,
        })?;

        let inner = WalkDir::new(destination)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();
        Ok(Self { inner })
    }
}

impl Iterator for TreeWalker {
    type Item = TreeEntry;

    fn next(&mut self) -> Option<TreeEntry> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            // min_depth(1) makes depth 1 the first level below the root.
            let depth = entry.depth() - 1;
            let path = entry.into_path();

            let node = match BackupFiles::scan(&path) {
                Ok(files) if files.is_empty() => continue,
                Ok(files) => files.into_node(&path),
                Err(e) => Err(e),
            };

            return Some(TreeEntry { depth, path, node });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NodeError;
    use std::fs::File;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_backup(dir: &Path, level: u32) {
        fs::create_dir_all(dir).unwrap();
        File::create(dir.join("archive.tar.gz")).unwrap();
        File::create(dir.join(format!("level{level}.snapshot"))).unwrap();
    }

    #[test]
    fn walks_nested_backups_depth_first_in_name_order() {
        let root = TempDir::new().unwrap();
        let full_a = root.path().join("20240101-120000-full");
        let inc_a1 = full_a.join("20240102-120000-incremental");
        let inc_a2 = inc_a1.join("20240103-120000-incremental");
        let full_b = root.path().join("20240110-120000-full");
        make_backup(&full_a, 0);
        make_backup(&inc_a1, 1);
        make_backup(&inc_a2, 2);
        make_backup(&full_b, 0);

        let entries: Vec<TreeEntry> = TreeWalker::new(root.path()).unwrap().collect();
        let visited: Vec<(usize, PathBuf)> =
            entries.iter().map(|e| (e.depth, e.path.clone())).collect();

        assert_eq!(
            visited,
            vec![
                (0, full_a.clone()),
                (1, inc_a1.clone()),
                (2, inc_a2.clone()),
                (0, full_b.clone()),
            ]
        );
        assert!(entries.iter().all(|e| e.node.is_ok()));
    }

    #[test]
    fn stray_directories_are_skipped_but_descended() {
        let root = TempDir::new().unwrap();
        // A grouping directory with no backup files of its own.
        let group = root.path().join("archive-sets");
        let full = group.join("20240101-120000-full");
        make_backup(&full, 0);
        fs::create_dir(root.path().join("empty")).unwrap();
        File::create(root.path().join("stray-file.txt")).unwrap();

        let entries: Vec<TreeEntry> = TreeWalker::new(root.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, full);
        // Depth counts directories below the root, not backup levels.
        assert_eq!(entries[0].depth, 1);
    }

    #[test]
    fn invalid_nodes_are_reported_and_their_children_still_visited() {
        let root = TempDir::new().unwrap();
        let broken_full = root.path().join("20240101-120000-full");
        fs::create_dir_all(&broken_full).unwrap();
        // Snapshot but no archive: invalid, yet backup-shaped.
        File::create(broken_full.join("level0.snapshot")).unwrap();
        let child = broken_full.join("20240102-120000-incremental");
        make_backup(&child, 1);

        let entries: Vec<TreeEntry> = TreeWalker::new(root.path()).unwrap().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].node, Err(NodeError::NoArchiveFound));
        assert_eq!(entries[1].path, child);
        assert!(entries[1].node.is_ok());
    }

    #[test]
    fn missing_destination_is_fatal() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("nonexistent");
        assert!(matches!(
            TreeWalker::new(&gone),
            Err(Error::DestinationUnreadable { .. })
        ));
    }

    #[test]
    fn empty_destination_yields_nothing() {
        let root = TempDir::new().unwrap();
        assert_eq!(TreeWalker::new(root.path()).unwrap().count(), 0);
    }
}
