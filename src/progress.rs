//! Progress Aggregator
//!
//! Single-threaded fold over per-file results. Progress is reported on two
//! independent triggers: every `every` files, and on every pool tick.

use std::fmt;
use tracing::info;

/// Files between count-triggered progress lines
pub const DEFAULT_PROGRESS_EVERY: u64 = 1000;

/// Point-in-time progress of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub processed: u64,
    pub total: u64,
}

impl Snapshot {
    /// Completion percentage; an empty run is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} files processed ({:.2}%)",
            self.processed,
            self.total,
            self.percent()
        )
    }
}

/// Counts processed files and decides when to report.
#[derive(Debug)]
pub struct Progress {
    processed: u64,
    total: u64,
    every: u64,
}

impl Progress {
    pub fn new(total: u64) -> Self {
        Self::with_interval(total, DEFAULT_PROGRESS_EVERY)
    }

    /// `every` of zero disables the count trigger.
    pub fn with_interval(total: u64, every: u64) -> Self {
        Self {
            processed: 0,
            total,
            every,
        }
    }

    /// Record one finished file; true when the count trigger fires.
    pub fn advance(&mut self) -> bool {
        self.processed += 1;
        self.every != 0 && self.processed % self.every == 0
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            processed: self.processed,
            total: self.total,
        }
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Log the current progress line
    pub fn report(&self) {
        info!("Progress: {}", self.snapshot());
    }

    /// Record one finished file and log if the count trigger fires
    pub fn record(&mut self) {
        if self.advance() {
            self.report();
        }
    }
}
