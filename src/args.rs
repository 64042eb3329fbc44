//! Command-line arguments for the monitor binary

use crate::config::ServerConfig;
use clap::Parser;
use std::path::PathBuf;

/// Processing-rate monitor for the clone detector's document store
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (created with defaults if missing)
    #[arg(short, long, default_value = "config.toml", env = "MONITOR_CONFIG")]
    pub config: String,

    /// HTTP port to listen on (overrides config file)
    #[arg(short, long, env = "MONITOR_PORT")]
    pub port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long, env = "MONITOR_HOST")]
    pub host: Option<String>,

    /// Number of worker threads (default: 1, use 0 for CPU cores)
    #[arg(short, long, env = "MONITOR_THREADS")]
    pub threads: Option<usize>,

    /// Also write logs to this file
    #[arg(long, env = "MONITOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Listen address with command-line overrides applied to `server`
    #[must_use]
    pub fn listen_addr(&self, server: &ServerConfig) -> String {
        format!(
            "{}:{}",
            self.host.as_deref().unwrap_or(&server.host),
            self.port.unwrap_or(server.port)
        )
    }
}
