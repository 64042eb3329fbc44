//! Configuration type definitions

use super::defaults;
use crate::types::duration_serde;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Main monitor configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Document store connection
    #[serde(default)]
    pub source: SourceConfig,
    /// Polling and retention settings
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// HTTP facade settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Document store connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "defaults::source_host")]
    pub host: String,
    #[serde(default = "defaults::source_port")]
    pub port: u16,
    #[serde(default = "defaults::database")]
    pub database: String,
    /// How long the driver waits for a reachable server
    #[serde(with = "duration_serde", default = "defaults::source_timeout")]
    pub timeout: Duration,
}

impl SourceConfig {
    /// Connection string for the store
    #[must_use]
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}/", self.host, self.port)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            host: defaults::source_host(),
            port: defaults::source_port(),
            database: defaults::database(),
            timeout: defaults::source_timeout(),
        }
    }
}

/// Polling loop and in-memory retention
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Interval between poll cycles
    #[serde(with = "duration_serde", default = "defaults::poll_interval")]
    pub poll_interval: Duration,
    /// Status updates kept for the dashboard
    #[serde(default = "defaults::recent_updates_capacity")]
    pub recent_updates_capacity: NonZeroUsize,
    /// Cap on entries per collection history; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<NonZeroUsize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: defaults::poll_interval(),
            recent_updates_capacity: defaults::recent_updates_capacity(),
            history_limit: None,
        }
    }
}

/// HTTP facade settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "defaults::server_host")]
    pub host: String,
    #[serde(default = "defaults::server_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Formatted listen address, e.g. `0.0.0.0:5000`
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::server_host(),
            port: defaults::server_port(),
        }
    }
}
