//! ConfigLoader: orchestrates sources and deserializes to CratelinkConfig.

use super::sources::{environment, global_file};
use super::CratelinkConfig;
use config::{Config, ConfigError, File, Map};
use std::path::Path;

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from standard sources.
    ///
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<CratelinkConfig, ConfigError> {
        let global = global_file::path();
        Self::load_with(global.as_deref(), explicit)
    }

    /// Load config with an explicit global file location.
    ///
    /// The explicit file, when given, must exist.
    pub fn load_with(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<CratelinkConfig, ConfigError> {
        Self::load_from(global, explicit, None)
    }

    /// Load config reading `env` in place of the process environment when given.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<CratelinkConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder, global);
        let builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder,
        };
        let builder = environment::add_to_builder(builder, env);

        builder.build()?.try_deserialize()
    }
}
