//! Configuration file handling.
//!
//! Every value is optional: command-line flags override the file, and the
//! file overrides nothing (a missing file is just an empty config). The CLI
//! layer performs the flag-over-file merge.

use crate::archiver::Compression;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the config file relative to `$HOME` when `--config` is not
/// given.
const DEFAULT_CONFIG_PATH: &str = ".config/strata/config.toml";

/// Defaults for the values every command otherwise takes as flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory to back up.
    pub source: Option<PathBuf>,
    /// Root directory the backup tree lives under.
    pub destination: Option<PathBuf>,
    /// Archive compression.
    pub compression: Option<Compression>,
    /// Default parent reference for incremental backups.
    pub parent: Option<String>,
    /// Directory restores extract into.
    pub restore_target: Option<PathBuf>,
    /// Alternative tar binary.
    pub tar_binary: Option<String>,
}

impl Config {
    /// Load the config from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, or from the default location if present,
    /// or fall back to the empty config.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn full_config_parses() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
source = "/home/user/documents"
destination = "/backups"
compression = "bzip2"
parent = "20240101-120000-full"
restore_target = "/restore"
tar_binary = "/usr/local/bin/gtar"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source, Some(PathBuf::from("/home/user/documents")));
        assert_eq!(config.destination, Some(PathBuf::from("/backups")));
        assert_eq!(config.compression, Some(Compression::Bzip2));
        assert_eq!(config.parent.as_deref(), Some("20240101-120000-full"));
        assert_eq!(config.restore_target, Some(PathBuf::from("/restore")));
        assert_eq!(config.tar_binary.as_deref(), Some("/usr/local/bin/gtar"));
    }

    #[test]
    fn partial_config_leaves_the_rest_unset() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"destination = "/backups""#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.destination, Some(PathBuf::from("/backups")));
        assert_eq!(config.source, None);
        assert_eq!(config.compression, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"compresion = "gzip""#).unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(Error::TomlParse(_))
        ));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/strata.toml")).is_err());
    }
}
