//! The backup orchestrator tying resolution, chains and the archiver
//! together.

use crate::archiver::Archiver;
use crate::chain::BackupChain;
use crate::error::Result;
use crate::naming;
use crate::node::BackupNode;
use crate::resolve;
use crate::walk::{TreeEntry, TreeWalker};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Archive metadata reported by `show`.
#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub path: PathBuf,
    pub level: u32,
    pub archive_path: PathBuf,
    pub archive_size: u64,
    pub modified: DateTime<Local>,
}

/// Orchestrates backup operations against one destination tree.
///
/// The destination directory itself is the only persistent state: every
/// operation re-reads it and nothing is cached between calls.
pub struct BackupEngine {
    destination: PathBuf,
    archiver: Archiver,
}

impl BackupEngine {
    pub fn new(destination: impl Into<PathBuf>, archiver: Archiver) -> Self {
        Self {
            destination: destination.into(),
            archiver,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Create a level-0 backup of `source` in a fresh timestamped directory
    /// under the destination root.
    ///
    /// The snapshot file is not pre-created: handing the archiver an absent
    /// snapshot is what makes it take a full backup.
    pub fn create_full(&self, source: &Path) -> Result<BackupNode> {
        fs::create_dir_all(&self.destination)?;
        let dir = self.destination.join(format!("{}-full", timestamp()));
        fs::create_dir(&dir)?;

        let snapshot_path = dir.join(naming::snapshot_file_name(0));
        let archive_path = dir.join(self.archiver.compression().archive_file_name());

        info!(
            "creating full backup of {} in {}",
            source.display(),
            dir.display()
        );
        self.archiver.create(&snapshot_path, source, &archive_path)?;

        Ok(BackupNode {
            path: dir,
            level: 0,
            archive_path,
            snapshot_path,
        })
    }

    /// Create an incremental backup of `source` on top of the backup
    /// `parent_ref` resolves to, nested inside the parent's directory.
    ///
    /// The parent's snapshot file is copied forward under the next level's
    /// name; the archiver reads it to decide what changed and updates the
    /// copy in place.
    pub fn create_incremental(&self, parent_ref: &str, source: &Path) -> Result<BackupNode> {
        let parent = self.resolve(parent_ref)?;
        let level = parent.level + 1;
        let dir = parent.path.join(format!("{}-incremental", timestamp()));
        fs::create_dir(&dir)?;

        let snapshot_path = dir.join(naming::snapshot_file_name(level));
        fs::copy(&parent.snapshot_path, &snapshot_path)?;
        let archive_path = dir.join(self.archiver.compression().archive_file_name());

        info!(
            "creating level {level} backup of {} in {} (parent {})",
            source.display(),
            dir.display(),
            parent.name()
        );
        self.archiver.create(&snapshot_path, source, &archive_path)?;

        Ok(BackupNode {
            path: dir,
            level,
            archive_path,
            snapshot_path,
        })
    }

    /// Enumerate every backup under the destination, valid or not, in
    /// chronological (filename) order.
    pub fn list(&self) -> Result<Vec<TreeEntry>> {
        Ok(TreeWalker::new(&self.destination)?.collect())
    }

    /// Resolve a path-or-name reference to a single backup node.
    pub fn resolve(&self, reference: &str) -> Result<BackupNode> {
        resolve::resolve(reference, &self.destination)
    }

    /// Resolve `reference` and report its archive metadata.
    pub fn show(&self, reference: &str) -> Result<BackupReport> {
        let node = self.resolve(reference)?;
        let metadata = fs::metadata(&node.archive_path)?;
        let modified = DateTime::from(metadata.modified()?);

        Ok(BackupReport {
            path: node.path,
            level: node.level,
            archive_path: node.archive_path,
            archive_size: metadata.len(),
            modified,
        })
    }

    /// Resolve `reference` and assemble its full restore chain without
    /// touching the target.
    pub fn plan_restore(&self, reference: &str) -> Result<BackupChain> {
        let node = self.resolve(reference)?;
        BackupChain::build(node)
    }

    /// Replay an assembled chain into `target`, one extraction per level in
    /// ascending order.
    pub fn restore_chain(&self, chain: &BackupChain, target: &Path) -> Result<()> {
        fs::create_dir_all(target)?;
        for node in chain {
            info!(
                "extracting level {} archive {}",
                node.level,
                node.archive_path.display()
            );
            self.archiver.extract(&node.archive_path, target)?;
        }
        Ok(())
    }

    /// Resolve, build the chain, and restore it into `target`.
    pub fn restore(&self, reference: &str, target: &Path) -> Result<BackupChain> {
        let chain = self.plan_restore(reference)?;
        self.restore_chain(&chain, target)?;
        Ok(chain)
    }

    /// Delete a resolved backup directory and everything nested under it,
    /// incremental children included. Irreversible.
    pub fn remove(&self, node: &BackupNode) -> Result<()> {
        info!("removing backup directory {}", node.path.display());
        fs::remove_dir_all(&node.path)?;
        Ok(())
    }
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}
