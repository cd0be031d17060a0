//! Mapping a user-supplied backup reference to exactly one node.

use crate::error::{Error, Result};
use crate::node::BackupNode;
use crate::walk::TreeWalker;
use std::path::Path;
use tracing::debug;

/// Resolve `reference` to a single backup node under `destination`.
///
/// Two-phase lookup: a reference naming an existing directory (as given, or
/// relative to the destination) is read directly; anything else is treated as
/// a bare directory name and searched for across the whole destination tree.
/// A bare name matching several backups is a hard error listing every
/// candidate; this never guesses between them.
pub fn resolve(reference: &str, destination: &Path) -> Result<BackupNode> {
    for dir in [Path::new(reference).to_path_buf(), destination.join(reference)] {
        if dir.is_dir() {
            debug!("resolved {reference:?} as directory {}", dir.display());
            return BackupNode::read(&dir).map_err(|source| Error::InvalidNode {
                path: dir,
                source,
            });
        }
    }

    debug!("searching destination tree for backup named {reference:?}");
    let mut matches: Vec<_> = TreeWalker::new(destination)?
        .filter(|entry| {
            entry
                .path
                .file_name()
                .is_some_and(|name| name.to_str() == Some(reference))
        })
        .collect();

    match matches.len() {
        0 => Err(Error::ParentNotFound {
            name: reference.to_string(),
        }),
        1 => {
            let entry = matches.remove(0);
            entry.node.map_err(|source| Error::InvalidNode {
                path: entry.path,
                source,
            })
        }
        _ => Err(Error::AmbiguousParent {
            name: reference.to_string(),
            candidates: matches.into_iter().map(|entry| entry.path).collect(),
        }),
    }
}
