//! Directory traversal policies
//!
//! Both input trees are walked with the same machinery: an [`EntryPolicy`]
//! classifies each visited entry once, and [`walk_files`] applies the verdict.
//! Pruned directories are never descended into; skipped files are dropped.
//! Traversal never follows symlinks and only regular files are reported.

use crate::error::{Error, Result};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Verdict for a visited entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Directory: walk its children
    Descend,
    /// Directory: do not walk its children
    Prune,
    /// File: report it
    Include,
    /// File: ignore it
    Skip,
}

/// Classifies entries of a tree walk
pub trait EntryPolicy {
    fn classify(&self, path: &Path, is_dir: bool) -> Visit;
}

/// Selects archive files by extension anywhere under the mirror root.
#[derive(Debug, Clone)]
pub struct ArchivePolicy {
    suffix: String,
}

impl ArchivePolicy {
    pub fn new(extension: &str) -> Self {
        Self {
            suffix: format!(".{}", extension.trim_start_matches('.')),
        }
    }
}

impl EntryPolicy for ArchivePolicy {
    fn classify(&self, path: &Path, is_dir: bool) -> Visit {
        if is_dir {
            return Visit::Descend;
        }
        match file_name(path) {
            Some(name) if name.ends_with(&self.suffix) => Visit::Include,
            _ => Visit::Skip,
        }
    }
}

/// Directories under the index root that never hold metadata records
pub const PRUNED_DIRECTORIES: &[&str] = &[
    ".git",
    ".venv",
    "site-packages",
    "pip",
    "python",
    "__pycache__",
];

/// File suffixes under the index root that are never metadata records
pub const SKIPPED_SUFFIXES: &[&str] = &[
    ".py", ".pyc", ".pyd", ".dll", ".exe", ".bat", ".sh", ".md", ".txt", ".html",
];

/// Registry index configuration file, not a package
pub const INDEX_CONFIG_FILE: &str = "config.json";

/// Selects candidate metadata record files under the index root.
///
/// Record files carry no extension of their own, so anything that is not
/// explicitly excluded is a candidate; content is sniffed line by line later.
#[derive(Debug, Clone, Default)]
pub struct RecordPolicy;

impl EntryPolicy for RecordPolicy {
    fn classify(&self, path: &Path, is_dir: bool) -> Visit {
        let name = file_name(path).unwrap_or_default();
        if is_dir {
            if PRUNED_DIRECTORIES.contains(&name) {
                return Visit::Prune;
            }
            return Visit::Descend;
        }
        if name == INDEX_CONFIG_FILE || SKIPPED_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            return Visit::Skip;
        }
        Visit::Include
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Walk `root`, calling `on_file` for every regular file the policy includes.
///
/// Entries are visited in lexical order within each directory. The root itself
/// is always descended. The first traversal error aborts the walk.
pub fn walk_files<P, F>(root: &Path, policy: &P, mut on_file: F) -> Result<()>
where
    P: EntryPolicy + ?Sized,
    F: FnMut(DirEntry),
{
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || policy.classify(entry.path(), true) != Visit::Prune
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::traversal(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if policy.classify(entry.path(), false) == Visit::Include {
            on_file(entry);
        }
    }
    Ok(())
}
