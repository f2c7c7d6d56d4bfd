//! Cratelink CLI Binary
//!
//! Command-line entry point for linking index metadata to mirrored crates.

use clap::Parser;
use cratelink::logging::init_logging;
use cratelink::tooling::cli::{Cli, CliContext};
use std::process;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to create logger: {}", e);
        process::exit(1);
    }

    let context = CliContext::new(config);
    if let Err(e) = context.execute(cli.command()) {
        error!("{}", e);
        process::exit(1);
    }
}
