use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Endpoints, LoggingConfig, ServerConfig, ServiceConfig};

/// Loads the application configuration.
///
/// Sources, lowest precedence first:
/// 1. built-in defaults,
/// 2. `path` if given (must exist), otherwise an optional `config.toml` in the working directory,
/// 3. environment variables prefixed with `SALESCOPE`, using `__` between nested keys
///    (e.g. `SALESCOPE_SERVICE__BASE_URL`).
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("SALESCOPE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(base_url = %config.service.base_url, "Configuration loaded.");
    Ok(config)
}
