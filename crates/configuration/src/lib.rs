use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{BonusByProfitParams, Config, OutputFormat, Report, Strategies};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Sources are layered in this order, later ones winning:
/// 1. built-in defaults,
/// 2. the TOML file at `path` (or `config.toml`), which may be absent,
/// 3. environment variables such as `SALES__REPORT__TOP_PRODUCTS_LIMIT=5`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        // An explicitly named file has to exist.
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("SALES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Missing sections fall back to their `Default` through `#[serde(default)]`.
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}
