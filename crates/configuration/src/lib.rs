use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::AnalysisArgs;
pub use error::ConfigError;
pub use settings::{AnalysisConfig, Config};

/// Prefix for environment overrides, e.g. `QUANTLENS__ANALYSIS__RISK_FREE_RATE=0.02`.
pub const ENV_PREFIX: &str = "QUANTLENS";

/// Loads the application configuration.
///
/// Built-in defaults are overlaid by the TOML file and then by environment
/// variables. With `path == None` the file is `config.toml` in the working
/// directory and may be absent; an explicit path must exist.
/// The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Missing sections and fields fall back to `Default` through `#[serde(default)]`.
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
