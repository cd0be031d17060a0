//! # strata
//!
//! Chained incremental backup manager driving GNU tar listed-incremental
//! archives.
//!
//! ## Features
//!
//! - **Backup Tree**: full (level 0) backups with incrementals nested one
//!   directory per level; the directory tree is the only index
//! - **Resolution**: backups addressable by path or by bare directory name,
//!   with hard failures on ambiguity
//! - **Chain Building**: restore chains reconstructed by walking the nesting
//!   upward, with strict level-by-level integrity checks
//! - **External Archiver**: archive creation and extraction delegated to GNU
//!   tar's listed-incremental mode
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use strata::{Archiver, BackupEngine, Compression};
//!
//! fn main() -> strata::Result<()> {
//!     let engine = BackupEngine::new("/backups", Archiver::new(Compression::Gzip));
//!
//!     let full = engine.create_full(Path::new("/home/user/documents"))?;
//!     println!("created level {} backup in {}", full.level, full.path.display());
//!
//!     engine.restore(&full.name(), Path::new("/tmp/restore"))?;
//!     Ok(())
//! }
//! ```

pub mod archiver;
pub mod chain;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod naming;
pub mod node;
pub mod resolve;
pub mod walk;

// Re-export commonly used types
pub use archiver::{Archiver, Compression};
pub use chain::BackupChain;
pub use config::Config;
pub use engine::{BackupEngine, BackupReport};
pub use error::{Error, NodeError, Result};
pub use node::BackupNode;
pub use walk::{TreeEntry, TreeWalker};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
