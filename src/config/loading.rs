//! Configuration loading from files and environment variables
//!
//! Environment variables take precedence over the config file so container
//! deployments can point the monitor at their store without editing it.

use anyhow::{Context, Result};
use std::path::Path;

use super::types::Config;

/// Environment variable overriding the document store host
pub const ENV_DB_HOST: &str = "DBHOST";
/// Environment variable overriding the document store port
pub const ENV_DB_PORT: &str = "MONITOR_DB_PORT";
/// Environment variable overriding the database name
pub const ENV_DATABASE: &str = "MONITOR_DATABASE";

/// Apply overrides from a variable lookup
///
/// Unparseable ports are ignored with a warning.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_DB_HOST).filter(|h| !h.trim().is_empty()) {
        tracing::info!("Using document store host '{}' from {}", host, ENV_DB_HOST);
        config.source.host = host;
    }

    if let Some(port) = lookup(ENV_DB_PORT) {
        match port.parse::<u16>() {
            Ok(port) => config.source.port = port,
            Err(e) => tracing::warn!("Ignoring {}='{}': {}", ENV_DB_PORT, port, e),
        }
    }

    if let Some(database) = lookup(ENV_DATABASE).filter(|d| !d.trim().is_empty()) {
        config.source.database = database;
    }
}

/// Load configuration from a TOML file, with environment variable overrides
pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file '{}'", config_path))?;

    let mut config: Config = toml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file '{}'", config_path))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config.validate()?;

    Ok(config)
}

/// Load the config file, writing a default one first if it does not exist
pub fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return load_config(config_path);
    }

    tracing::warn!(
        "Config file '{}' not found, creating default config",
        config_path
    );
    let default_config = create_default_config();
    let config_toml = toml::to_string_pretty(&default_config)?;
    std::fs::write(config_path, &config_toml)
        .with_context(|| format!("Failed to write default config '{}'", config_path))?;
    tracing::info!("Created default config file: {}", config_path);

    load_config(config_path)
}

/// Create a default configuration
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}
