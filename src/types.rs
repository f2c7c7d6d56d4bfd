//! Core types shared across the link pipeline.

use std::ops::AddAssign;

/// Extension of the metadata files written next to each archive
pub const METADATA_SUFFIX: &str = "metadata.json";

/// Default extension of mirrored archives
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "crate";

/// Per-file outcome of joining version records against the archive index
///
/// `total` counts every record with a usable `vers` field; `success` counts
/// the ones whose archive resolved and whose metadata was written (or would
/// have been, in a dry run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingTally {
    pub success: u64,
    pub total: u64,
}

impl ProcessingTally {
    pub fn new(success: u64, total: u64) -> Self {
        Self { success, total }
    }
}

impl AddAssign for ProcessingTally {
    fn add_assign(&mut self, other: Self) {
        self.success += other.success;
        self.total += other.total;
    }
}

/// Name of the archive for a package version, e.g. `serde-1.0.0.crate`
pub fn archive_file_name(package: &str, version: &str, extension: &str) -> String {
    format!(
        "{}-{}.{}",
        package,
        version,
        extension.trim_start_matches('.')
    )
}

/// Name of the derived metadata file, e.g. `serde-1.0.0.metadata.json`
pub fn metadata_file_name(package: &str, version: &str) -> String {
    format!("{}-{}.{}", package, version, METADATA_SUFFIX)
}
