//! Environment variable source: CRATELINK_ prefix with __ separator

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};

/// Add environment variable overlay to builder.
///
/// `CRATELINK_MIRROR_DIR` sets `mirror_dir`; nested keys use `__`, as in
/// `CRATELINK_LOGGING__LEVEL`. With `vars` set, those variables are read
/// instead of the process environment.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CRATELINK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars),
    )
}
