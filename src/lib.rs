//! Cratelink: Registry Metadata to Mirror Linking
//!
//! Walks a crates.io-style registry index and, for every version record whose
//! archive exists in a local mirror, writes that record as a standalone
//! `<name>-<version>.metadata.json` file beside the archive. The mirror may be
//! flat or sharded into two-level subdirectories.

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod organize;
pub mod pool;
pub mod processor;
pub mod progress;
pub mod record;
pub mod shard;
pub mod tooling;
pub mod types;
pub mod walk;
