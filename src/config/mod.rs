//! Configuration module
//!
//! This module handles all configuration types and loading
//! for the monitor.

mod defaults;
mod loading;
mod types;
mod validation;

pub use loading::{
    ENV_DATABASE, ENV_DB_HOST, ENV_DB_PORT, apply_env_overrides, create_default_config,
    load_config, load_or_create_config,
};
pub use types::{Config, MonitorConfig, ServerConfig, SourceConfig};
