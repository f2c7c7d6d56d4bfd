//! Mirror sharding
//!
//! Moves the files of a flat mirror into a two-level layout so no single
//! directory holds millions of entries:
//!
//! - names starting with a letter go to `X/XA-XD` .. `X/XY-XZ`, grouped by
//!   their second letter (first group when there is none)
//! - names starting with a digit go to `0-9/0-2`, `0-9/3-5` or `0-9/6-9`
//! - everything else goes to `OTHER/OTHER`
//!
//! Only files directly under the mirror root are moved, so running it again is
//! a no-op. The link pipeline resolves archives by file name and does not care
//! whether this has been run.

use crate::error::{Error, Result};
use crate::pool::{PoolEvent, WorkerPool};
use crate::progress::Progress;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Letters per second-level group
const LETTER_GROUP_SIZE: u8 = 4;

const DIGITS_DIR: &str = "0-9";
const DIGIT_GROUPS: &[(&str, &[char])] = &[
    ("0-2", &['0', '1', '2']),
    ("3-5", &['3', '4', '5']),
    ("6-9", &['6', '7', '8', '9']),
];

const OTHER_DIR: &str = "OTHER";

/// Two-level directory a mirror file belongs in
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShardSlot {
    pub first: String,
    pub second: String,
}

impl ShardSlot {
    fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    fn other() -> Self {
        Self::new(OTHER_DIR, OTHER_DIR)
    }

    /// `first/second`, relative to the mirror root
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(&self.first).join(&self.second)
    }
}

fn letter_group(letter: char, group: u8) -> String {
    let start = b'A' + group * LETTER_GROUP_SIZE;
    let end = (start + LETTER_GROUP_SIZE - 1).min(b'Z');
    format!("{0}{1}-{0}{2}", letter, start as char, end as char)
}

/// Every slot of the layout, in directory creation order
pub fn all_slots() -> Vec<ShardSlot> {
    let mut slots = Vec::new();
    for letter in 'A'..='Z' {
        let groups = 26u8.div_ceil(LETTER_GROUP_SIZE);
        for group in 0..groups {
            slots.push(ShardSlot::new(letter.to_string(), letter_group(letter, group)));
        }
    }
    for (group, _) in DIGIT_GROUPS {
        slots.push(ShardSlot::new(DIGITS_DIR, *group));
    }
    slots.push(ShardSlot::other());
    slots
}

/// Slot for a file name, decided by its first two characters (case-insensitive)
pub fn shard_slot(file_name: &str) -> ShardSlot {
    let mut chars = file_name.chars();
    let first = match chars.next() {
        Some(c) => c.to_ascii_uppercase(),
        None => return ShardSlot::other(),
    };

    if first.is_ascii_uppercase() {
        let second = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or('A');
        let group = if second.is_ascii_uppercase() {
            (second as u8 - b'A') / LETTER_GROUP_SIZE
        } else {
            0
        };
        return ShardSlot::new(first.to_string(), letter_group(first, group));
    }

    if first.is_ascii_digit() {
        let group = DIGIT_GROUPS
            .iter()
            .find(|(_, digits)| digits.contains(&first))
            .map(|(name, _)| *name)
            .unwrap_or(DIGIT_GROUPS[0].0);
        return ShardSlot::new(DIGITS_DIR, group);
    }

    ShardSlot::other()
}

/// Inputs of one shard run
#[derive(Debug, Clone)]
pub struct ShardOptions {
    pub mirror_root: PathBuf,
    pub workers: usize,
    pub dry_run: bool,
}

/// Outcome of a shard run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardReport {
    /// Files moved into their slot (always zero in a dry run)
    pub moved: u64,
    /// Files found directly under the mirror root
    pub total: u64,
    /// Planned files per first-level directory
    pub first_level: BTreeMap<String, u64>,
    /// Planned files per `first/second` directory
    pub second_level: BTreeMap<String, u64>,
}

struct PlannedMove {
    source: PathBuf,
    target: PathBuf,
}

fn list_top_level_files(root: &Path) -> Result<Vec<PathBuf>> {
    let listing_error = |source| Error::Listing {
        root: root.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(root).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        if entry.file_type().map_err(listing_error)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn create_directories(root: &Path) -> Result<()> {
    for slot in all_slots() {
        let dir = root.join(slot.relative_dir());
        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
            info!("Created directory: {}", dir.display());
        }
    }
    Ok(())
}

fn move_file(planned: &PlannedMove) -> bool {
    match fs::rename(&planned.source, &planned.target) {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Error moving {} to {}: {}",
                planned.source.display(),
                planned.target.display(),
                e
            );
            false
        }
    }
}

/// Move every file directly under the mirror root into its slot.
///
/// In a dry run nothing is created or moved; the planned per-directory counts
/// are logged instead. Failing to list the mirror or to create the layout is
/// fatal; a failed move is logged and not counted.
pub fn shard_mirror(options: &ShardOptions) -> Result<ShardReport> {
    let root = &options.mirror_root;
    let files = list_top_level_files(root)?;
    info!("Found {} files to organize", files.len());

    let mut report = ShardReport {
        total: files.len() as u64,
        ..ShardReport::default()
    };
    let mut plan = Vec::with_capacity(files.len());
    for source in files {
        let name = match source.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        let slot = shard_slot(&name.to_string_lossy());
        *report.first_level.entry(slot.first.clone()).or_default() += 1;
        *report
            .second_level
            .entry(format!("{}/{}", slot.first, slot.second))
            .or_default() += 1;
        plan.push(PlannedMove {
            target: root.join(slot.relative_dir()).join(name),
            source,
        });
    }

    if options.dry_run {
        info!("DRY RUN: No files will be moved");
        info!("First-level directory counts:");
        for (dir, count) in &report.first_level {
            info!("  {}/: {} files", dir, count);
        }
        info!("Second-level directory counts:");
        for (dir, count) in &report.second_level {
            info!("  {}/: {} files", dir, count);
        }
        return Ok(report);
    }

    create_directories(root)?;

    let mut progress = Progress::new(plan.len() as u64);
    let mut moved = 0;
    WorkerPool::new(options.workers).run(&plan, move_file, |event| match event {
        PoolEvent::Completed(ok) => {
            if ok {
                moved += 1;
            }
            progress.record();
        }
        PoolEvent::Tick => progress.report(),
    })?;
    report.moved = moved;

    info!(
        "Successfully moved {} out of {} files",
        report.moved, report.total
    );
    Ok(report)
}
