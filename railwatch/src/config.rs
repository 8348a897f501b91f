//! Layered configuration loading

use crate::errors::ConfigError;
use config::{Config, Environment, File};
use std::path::PathBuf;
use tracing::debug;

/// Broker address used when configuration provides none.
pub const DEFAULT_BOOTSTRAP: &str = "localhost:9092";

/// Builds the layered configuration for a service crate.
///
/// Sources, later overriding earlier: `config/default`, the file named by
/// `RAIL_ENV` (default `dev`), then environment variables prefixed `RAIL_`,
/// so `RAIL_BOOTSTRAP` overrides the `bootstrap` key. The configuration
/// root defaults to the crate's `config` directory and can be moved with
/// `RAIL_CONFIG_ROOT`.
pub fn build_config(crate_dir: PathBuf) -> Result<Config, ConfigError> {
    let config_root = std::env::var("RAIL_CONFIG_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| crate_dir.join("config"));
    let env = std::env::var("RAIL_ENV").unwrap_or_else(|_| "dev".to_string());
    let config = Config::builder()
        .add_source(File::from(config_root.join("default")).required(false))
        .add_source(File::from(config_root.join(env)).required(false))
        .add_source(
            Environment::with_prefix("RAIL")
                .separator("__")
                .list_separator(","),
        )
        .build()?;
    Ok(config)
}

/// Reads the broker bootstrap address, defaulting to [`DEFAULT_BOOTSTRAP`].
pub fn load_bootstrap(config: &Config) -> String {
    config.get("bootstrap").unwrap_or_else(|_| {
        debug!("no bootstrap configured, using {DEFAULT_BOOTSTRAP}");
        DEFAULT_BOOTSTRAP.to_string()
    })
}
