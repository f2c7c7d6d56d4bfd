//! Archive Index
//!
//! Maps archive file names to their absolute location in the mirror. The
//! mirror may be flat or sharded into subdirectories; lookups are by file name
//! only, so the layout does not matter.
//!
//! The index is built once, before any record is processed, and is never
//! mutated afterwards. Workers share it by reference without locking.

use crate::error::Result;
use crate::walk::{walk_files, ArchivePolicy};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Archive file name -> absolute path
#[derive(Debug, Default)]
pub struct ArchiveIndex {
    entries: HashMap<String, PathBuf>,
}

impl ArchiveIndex {
    /// Scan `mirror_root` recursively for files ending in `.{extension}`.
    ///
    /// If two files share a name, the one visited later (lexical order) wins.
    /// Any traversal error aborts the build: a partial index would silently
    /// undercount every run that used it.
    pub fn build(mirror_root: &Path, extension: &str) -> Result<Self> {
        info!("Building archive index from {}...", mirror_root.display());
        let start = Instant::now();

        let root = dunce::canonicalize(mirror_root)?;
        let policy = ArchivePolicy::new(extension);
        let mut entries = HashMap::new();

        walk_files(&root, &policy, |entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.into_path();
            if let Some(previous) = entries.insert(name, path) {
                debug!(previous = %previous.display(), "Duplicate archive name, keeping later path");
            }
        })?;

        info!(
            "Built index of {} archive files in {:?}",
            entries.len(),
            start.elapsed()
        );
        Ok(Self { entries })
    }

    /// Resolve an archive file name to its path in the mirror
    pub fn get(&self, file_name: &str) -> Option<&Path> {
        self.entries.get(file_name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, PathBuf)> for ArchiveIndex {
    fn from_iter<I: IntoIterator<Item = (String, PathBuf)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
