//! Configuration validation
//!
//! Zero capacities are already rejected by the `NonZero` types; this checks
//! the remaining semantic constraints before the monitor starts.

use anyhow::Result;
use std::time::Duration;

use super::types::Config;

/// Poll intervals below this put noticeable load on the store
const MIN_RECOMMENDED_POLL_INTERVAL: Duration = Duration::from_secs(1);

impl Config {
    /// Validate configuration for correctness
    pub fn validate(&self) -> Result<()> {
        if self.monitor.poll_interval.is_zero() {
            anyhow::bail!("monitor.poll_interval must be at least 1 second");
        }
        if self.source.host.trim().is_empty() {
            anyhow::bail!("source.host cannot be empty");
        }
        if self.source.database.trim().is_empty() {
            anyhow::bail!("source.database cannot be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("server.port cannot be 0");
        }

        if self.monitor.poll_interval < MIN_RECOMMENDED_POLL_INTERVAL {
            tracing::warn!(
                "monitor.poll_interval is {:?} (< {:?}); every cycle runs four count queries",
                self.monitor.poll_interval,
                MIN_RECOMMENDED_POLL_INTERVAL
            );
        }

        Ok(())
    }
}
