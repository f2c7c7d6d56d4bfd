//! Configuration
//!
//! Settings are layered with the `config` crate; see [`ConfigLoader`] for the
//! precedence. Command-line flags are applied on top by the CLI.

mod loader;
mod sources;

pub use loader::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::organize::OrganizeOptions;
use crate::pool::default_worker_count;
use crate::shard::ShardOptions;
use crate::types::DEFAULT_ARCHIVE_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_index_dir() -> PathBuf {
    PathBuf::from("./index")
}

fn default_mirror_dir() -> PathBuf {
    PathBuf::from("./mirror")
}

fn default_archive_extension() -> String {
    DEFAULT_ARCHIVE_EXTENSION.to_string()
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CratelinkConfig {
    /// Registry index tree holding one metadata record file per package
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Mirrored archive tree, flat or sharded
    #[serde(default = "default_mirror_dir")]
    pub mirror_dir: PathBuf,

    /// Archive file extension, without the leading dot
    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,

    /// Worker threads; None means one per available CPU
    #[serde(default)]
    pub workers: Option<usize>,

    /// Resolve and count without touching the filesystem
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for CratelinkConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            mirror_dir: default_mirror_dir(),
            archive_extension: default_archive_extension(),
            workers: None,
            dry_run: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl CratelinkConfig {
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_worker_count)
    }

    pub fn organize_options(&self) -> OrganizeOptions {
        OrganizeOptions {
            index_root: self.index_dir.clone(),
            mirror_root: self.mirror_dir.clone(),
            workers: self.worker_count(),
            dry_run: self.dry_run,
            archive_extension: self.archive_extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn shard_options(&self) -> ShardOptions {
        ShardOptions {
            mirror_root: self.mirror_dir.clone(),
            workers: self.worker_count(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CratelinkConfig::default();
        assert_eq!(config.index_dir, PathBuf::from("./index"));
        assert_eq!(config.mirror_dir, PathBuf::from("./mirror"));
        assert_eq!(config.archive_extension, "crate");
        assert!(!config.dry_run);
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_organize_options_normalize_extension() {
        let config = CratelinkConfig {
            archive_extension: ".crate".to_string(),
            workers: Some(3),
            ..CratelinkConfig::default()
        };
        let options = config.organize_options();
        assert_eq!(options.archive_extension, "crate");
        assert_eq!(options.workers, 3);
    }
}
