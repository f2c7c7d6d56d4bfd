//! Metadata organization pipeline
//!
//! Builds the archive index, enumerates metadata record files, and joins them
//! in parallel. The index is complete before the first record is looked at;
//! resolving against a partial index would silently undercount.

use crate::error::Result;
use crate::index::ArchiveIndex;
use crate::pool::{PoolEvent, WorkerPool};
use crate::processor::{process_record_file, ProcessOptions};
use crate::progress::Progress;
use crate::types::ProcessingTally;
use crate::walk::{walk_files, RecordPolicy};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Inputs of one organize run
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub index_root: PathBuf,
    pub mirror_root: PathBuf,
    pub workers: usize,
    pub dry_run: bool,
    pub archive_extension: String,
}

/// Totals of a finished organize run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Metadata record files processed
    pub files: u64,
    pub tally: ProcessingTally,
}

/// Enumerate candidate metadata record files under `index_root`.
pub fn find_record_files(index_root: &Path) -> Result<Vec<PathBuf>> {
    info!("Finding metadata files in {}...", index_root.display());
    let start = Instant::now();

    let mut files = Vec::new();
    walk_files(index_root, &RecordPolicy, |entry| files.push(entry.into_path()))?;

    info!(
        "Found {} metadata files in {:?}",
        files.len(),
        start.elapsed()
    );
    Ok(files)
}

/// Link every version record under the index root to its archive in the mirror.
///
/// Returns once every record file has been processed and its tally folded in.
/// Only traversal and pool start-up failures are errors; per-record problems
/// are logged.
pub fn organize(options: &OrganizeOptions) -> Result<OrganizeReport> {
    organize_on(options, &WorkerPool::new(options.workers))
}

/// [`organize`] on an explicitly configured pool; `options.workers` is ignored.
pub fn organize_on(options: &OrganizeOptions, pool: &WorkerPool) -> Result<OrganizeReport> {
    let index = ArchiveIndex::build(&options.mirror_root, &options.archive_extension)?;
    let files = find_record_files(&options.index_root)?;

    info!("Processing {} metadata files...", files.len());
    if options.dry_run {
        info!("DRY RUN: No files will be created");
    }

    let process = ProcessOptions {
        archive_extension: options.archive_extension.clone(),
        dry_run: options.dry_run,
    };
    let mut progress = Progress::new(files.len() as u64);
    let mut tally = ProcessingTally::default();

    pool.run(
        &files,
        |path| process_record_file(path, &index, &process),
        |event| match event {
            PoolEvent::Completed(file_tally) => {
                tally += file_tally;
                progress.record();
            }
            PoolEvent::Tick => progress.report(),
        },
    )?;

    Ok(OrganizeReport {
        files: progress.processed(),
        tally,
    })
}
