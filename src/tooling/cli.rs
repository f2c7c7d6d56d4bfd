//! CLI Tooling
//!
//! Command-line interface for linking index metadata to mirrored archives and
//! for sharding a flat mirror. Flags override the layered configuration.

use crate::config::{ConfigLoader, CratelinkConfig};
use crate::error::{Error, Result};
use crate::organize::{organize, OrganizeReport};
use crate::shard::{shard_mirror, ShardReport};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Cratelink CLI - place crates.io index metadata next to mirrored crates
#[derive(Parser, Debug)]
#[command(name = "cratelink")]
#[command(about = "Link crates.io index metadata records to mirrored crate archives")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing the crates.io index
    #[arg(long, global = true)]
    pub index_dir: Option<PathBuf>,

    /// Directory containing the mirrored crates
    #[arg(long, global = true)]
    pub mirror_dir: Option<PathBuf>,

    /// Path to log file
    #[arg(long, global = true)]
    pub log_path: Option<PathBuf>,

    /// Number of worker threads (default: CPU count)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Dry run mode (no files will be created or moved)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Archive file extension
    #[arg(long, global = true)]
    pub archive_ext: Option<String>,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stdout, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Write each version's metadata next to its archive (default)
    Link,
    /// Move a flat mirror into two-level subdirectories
    Shard,
}

impl Cli {
    /// Subcommand to run; `link` when none was given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Link)
    }

    /// Load layered configuration and apply flag overrides
    pub fn load_config(&self) -> Result<CratelinkConfig> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut CratelinkConfig) {
        if let Some(dir) = &self.index_dir {
            config.index_dir = dir.clone();
        }
        if let Some(dir) = &self.mirror_dir {
            config.mirror_dir = dir.clone();
        }
        if let Some(path) = &self.log_path {
            config.logging.file = path.clone();
        }
        if let Some(threads) = self.threads {
            config.workers = Some(threads);
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(ext) = &self.archive_ext {
            config.archive_extension = ext.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
    }
}

fn ensure_directory(role: &'static str, path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::MissingDirectory {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// Executes commands against a resolved configuration
pub struct CliContext {
    config: CratelinkConfig,
}

impl CliContext {
    pub fn new(config: CratelinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CratelinkConfig {
        &self.config
    }

    /// Execute a command, logging its summary
    pub fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Link => self.link().map(|_| ()),
            Commands::Shard => self.shard().map(|_| ()),
        }
    }

    /// Link metadata records to archives and log the run summary
    pub fn link(&self) -> Result<OrganizeReport> {
        let config = &self.config;
        info!(
            "Starting organization of metadata from {} to {}",
            config.index_dir.display(),
            config.mirror_dir.display()
        );
        ensure_directory("Index", &config.index_dir)?;
        ensure_directory("Mirror", &config.mirror_dir)?;

        let start = Instant::now();
        let report = organize(&config.organize_options())?;
        let duration = start.elapsed();

        if config.dry_run {
            info!(
                "DRY RUN COMPLETE: Would have organized {} out of {} version metadata files from {} metadata files in {:?}",
                report.tally.success, report.tally.total, report.files, duration
            );
        } else {
            info!(
                "Organization complete: {} out of {} version metadata files successfully organized from {} metadata files in {:?}",
                report.tally.success, report.tally.total, report.files, duration
            );
        }
        Ok(report)
    }

    /// Shard the mirror and log the run summary
    pub fn shard(&self) -> Result<ShardReport> {
        let config = &self.config;
        info!(
            "Starting organization of crates in {}",
            config.mirror_dir.display()
        );
        ensure_directory("Mirror", &config.mirror_dir)?;

        let start = Instant::now();
        let report = shard_mirror(&config.shard_options())?;
        let duration = start.elapsed();

        if config.dry_run {
            info!(
                "DRY RUN COMPLETE: Would have organized {} files in {:?}",
                report.total, duration
            );
        } else {
            info!(
                "Organization complete: {}/{} files successfully organized in {:?}",
                report.moved, report.total, duration
            );
        }
        Ok(report)
    }
}
