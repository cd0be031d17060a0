//! Reconstructing the restore chain from a full backup down to a target.

use crate::error::{Error, Result};
use crate::node::BackupNode;
use tracing::debug;

/// The ordered sequence of backups needed to restore a target node: level 0
/// first, the target last.
///
/// Built by walking up one physical directory per logical level and checking
/// that each ancestor's level is exactly one less than its child's. Any
/// mismatch means the on-disk nesting no longer reflects the incremental
/// lineage and the chain is declared broken rather than restored wrong.
///
/// Only ascending iteration is exposed; replaying the chain in that order is
/// what reconstructs the file tree correctly.
#[derive(Debug)]
pub struct BackupChain {
    nodes: Vec<BackupNode>,
}

impl BackupChain {
    /// Assemble the chain ending at `target`.
    ///
    /// A target at level L yields exactly L+1 nodes. Fails with
    /// [`Error::BrokenChain`] at the first ancestor directory that is not a
    /// valid backup of the expected level.
    pub fn build(target: BackupNode) -> Result<Self> {
        let mut nodes = Vec::with_capacity(target.level as usize + 1);
        let mut current = target;

        while current.level > 0 {
            let expected = current.level - 1;
            let parent_dir = match current.path.parent() {
                Some(parent) => parent.to_path_buf(),
                None => {
                    return Err(Error::BrokenChain {
                        dir: current.path.clone(),
                        expected,
                        found: None,
                    })
                }
            };

            let parent = match BackupNode::read(&parent_dir) {
                Ok(node) if node.level == expected => node,
                Ok(node) => {
                    return Err(Error::BrokenChain {
                        dir: parent_dir,
                        expected,
                        found: Some(node.level),
                    })
                }
                Err(e) => {
                    debug!("ancestor {} is not a valid backup: {e}", parent_dir.display());
                    return Err(Error::BrokenChain {
                        dir: parent_dir,
                        expected,
                        found: None,
                    });
                }
            };

            nodes.push(current);
            current = parent;
        }

        nodes.push(current);
        nodes.reverse();
        Ok(Self { nodes })
    }

    /// Number of backups in the chain: target level + 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node this chain restores to, at the highest level.
    pub fn target(&self) -> &BackupNode {
        // Construction guarantees at least the target itself.
        &self.nodes[self.nodes.len() - 1]
    }

    /// Nodes in ascending level order, 0 to the target level.
    pub fn iter(&self) -> std::slice::Iter<'_, BackupNode> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a BackupChain {
    type Item = &'a BackupNode;
    type IntoIter = std::slice::Iter<'a, BackupNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for BackupChain {
    type Item = BackupNode;
    type IntoIter = std::vec::IntoIter<BackupNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::TempDir;

    fn make_backup(dir: &Path, level: u32) -> BackupNode {
        fs::create_dir_all(dir).unwrap();
        File::create(dir.join("archive.tar.gz")).unwrap();
        File::create(dir.join(format!("level{level}.snapshot"))).unwrap();
        BackupNode::read(dir).unwrap()
    }

    #[test]
    fn full_backup_is_a_chain_of_one() {
        let root = TempDir::new().unwrap();
        let full = make_backup(&root.path().join("20240101-120000-full"), 0);

        let chain = BackupChain::build(full.clone()).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.target(), &full);
    }

    #[test]
    fn incremental_chain_runs_from_level_zero_to_the_target() {
        let root = TempDir::new().unwrap();
        let full_dir = root.path().join("20240101-120000-full");
        let inc_dir = full_dir.join("20240102-120000-incremental");
        let full = make_backup(&full_dir, 0);
        let inc = make_backup(&inc_dir, 1);

        let chain = BackupChain::build(inc.clone()).unwrap();
        let levels: Vec<u32> = chain.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![0, 1]);
        assert_eq!(chain.iter().next().unwrap(), &full);
        assert_eq!(chain.target(), &inc);
    }

    #[test]
    fn chain_length_tracks_the_target_level() {
        let root = TempDir::new().unwrap();
        let mut dir = root.path().join("20240101-120000-full");
        make_backup(&dir, 0);
        for level in 1..=4 {
            dir = dir.join(format!("2024010{}-120000-incremental", level + 1));
            make_backup(&dir, level);
        }

        let target = BackupNode::read(&dir).unwrap();
        let chain = BackupChain::build(target).unwrap();
        assert_eq!(chain.len(), 5);
        let levels: Vec<u32> = chain.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn level_skip_in_the_nesting_breaks_the_chain() {
        let root = TempDir::new().unwrap();
        let full_dir = root.path().join("20240101-120000-full");
        let inc_dir = full_dir.join("20240102-120000-incremental");
        make_backup(&full_dir, 0);
        // Level 2 nested directly under level 0: level 1 is missing.
        let inc = make_backup(&inc_dir, 2);

        let err = BackupChain::build(inc).unwrap_err();
        match err {
            Error::BrokenChain {
                dir,
                expected,
                found,
            } => {
                assert_eq!(dir, full_dir);
                assert_eq!(expected, 1);
                assert_eq!(found, Some(0));
            }
            other => panic!("expected BrokenChain, got {other:?}"),
        }
    }

    #[test]
    fn invalid_ancestor_breaks_the_chain() {
        let root = TempDir::new().unwrap();
        let full_dir = root.path().join("20240101-120000-full");
        let inc_dir = full_dir.join("20240102-120000-incremental");
        fs::create_dir_all(&full_dir).unwrap();
        // Ancestor has no archive, so it is not a valid backup.
        File::create(full_dir.join("level0.snapshot")).unwrap();
        let inc = make_backup(&inc_dir, 1);

        let err = BackupChain::build(inc).unwrap_err();
        assert!(matches!(
            err,
            Error::BrokenChain {
                expected: 0,
                found: None,
                ..
            }
        ));
    }
}
