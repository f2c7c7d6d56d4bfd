//! Tooling & Integration Layer
//!
//! Command-line surface over the organize and shard pipelines.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
