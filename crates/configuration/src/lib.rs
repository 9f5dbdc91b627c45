use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, FarmSettings, LogFormat, LoggingSettings};

/// Prefix of the environment variables that override file values,
/// e.g. `SHRIMPFARM__FARM__FEED_COST_PER_KG=6.2`.
pub const ENV_PREFIX: &str = "SHRIMPFARM";

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. It reads the optional TOML
/// file at `path`, layers the `SHRIMPFARM__*` environment variables on top, deserializes
/// the result into our strongly-typed `Config` struct and validates it. Anything left
/// unset falls back to the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?path, "Configuration loaded.");
    Ok(config)
}
