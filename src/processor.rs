//! Record Processor
//!
//! Joins every version record of one metadata record file against the
//! [`ArchiveIndex`] and writes the derived metadata file next to each resolved
//! archive.
//!
//! Nothing that goes wrong with a single record escapes this module. Malformed
//! JSON, unresolved archives, and write failures are logged and skipped; records
//! without a version are skipped without a trace.

use crate::index::ArchiveIndex;
use crate::record::{parse_line, RecordLine, VersionRecord};
use crate::types::{archive_file_name, metadata_file_name, ProcessingTally};
use crate::walk::INDEX_CONFIG_FILE;
use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

/// Per-run settings shared by every processed file
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Extension of mirrored archives, without the leading dot
    pub archive_extension: String,
    /// Resolve and count without writing anything
    pub dry_run: bool,
}

/// Process one metadata record file.
///
/// The package name is the file's base name. Returns how many versions were
/// eligible and how many of those were linked to an archive.
pub fn process_record_file(
    path: &Path,
    index: &ArchiveIndex,
    options: &ProcessOptions,
) -> ProcessingTally {
    let package = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return ProcessingTally::default(),
    };
    if package == ".git" || package == INDEX_CONFIG_FILE {
        return ProcessingTally::default();
    }

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read metadata file {}: {}", path.display(), e);
            return ProcessingTally::default();
        }
    };
    let content = String::from_utf8_lossy(&content);

    let mut tally = ProcessingTally::default();
    for line in content.lines() {
        let record = match parse_line(line) {
            RecordLine::Version(record) => record,
            RecordLine::Malformed(e) => {
                error!("Error parsing JSON in {}: {}", path.display(), e);
                continue;
            }
            RecordLine::Blank | RecordLine::NotAnObject | RecordLine::Unversioned => continue,
        };

        tally.total += 1;
        if link_record(&package, &record, index, options) {
            tally.success += 1;
        }
    }
    tally
}

/// Resolve one record's archive and write its metadata beside it.
fn link_record(
    package: &str,
    record: &VersionRecord,
    index: &ArchiveIndex,
    options: &ProcessOptions,
) -> bool {
    let version = record.version();
    let archive = archive_file_name(package, version, &options.archive_extension);
    let archive_path = match index.get(&archive) {
        Some(path) => path,
        None => {
            warn!("Could not find archive file for {}-{}", package, version);
            return false;
        }
    };

    let output_path = archive_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(metadata_file_name(package, version));

    if options.dry_run {
        return true;
    }

    let json = match record.to_pretty_json() {
        Ok(json) => json,
        Err(e) => {
            error!("Error serializing metadata for {}-{}: {}", package, version, e);
            return false;
        }
    };
    if let Err(e) = fs::write(&output_path, json) {
        error!("Error writing metadata file for {}-{}: {}", package, version, e);
        return false;
    }
    debug!(path = %output_path.display(), "Wrote metadata file");
    true
}
