//! User-wide config file: `<platform config dir>/cratelink/config.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::{Path, PathBuf};

/// Platform config file location, if the platform has a config directory
pub fn path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "cratelink")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global file to builder; a missing file is not an error.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) => builder.add_source(File::from(path).required(false)),
        None => builder,
    }
}
