//! Constants used throughout the monitor
//!
//! Centralizes the fixed values of the polling loop, the update buffer,
//! the document store layout and the HTTP facade.

/// Polling loop
pub mod poll {
    use std::time::Duration;

    /// Interval between two poll cycles
    pub const INTERVAL: Duration = Duration::from_secs(5);
}

/// Recent status update buffer
pub mod updates {
    use std::num::NonZeroUsize;

    /// Number of status updates kept in memory
    pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

    /// Updates returned when a request gives no limit
    pub const DEFAULT_LIMIT: usize = 10;

    /// Updates included in the combined stats response
    pub const STATS_LIMIT: usize = 1000;
}

/// Document store layout
pub mod store {
    /// Default MongoDB port
    pub const DEFAULT_PORT: u16 = 27017;

    /// Database written by the clone detector
    pub const DEFAULT_DATABASE: &str = "cloneDetector";

    /// Collection holding status messages
    pub const STATUS_COLLECTION: &str = "statusUpdates";
}

/// HTTP facade
pub mod http {
    /// Default listen port
    pub const DEFAULT_PORT: u16 = 5000;

    /// Default listen host (all interfaces)
    pub const DEFAULT_HOST: &str = "0.0.0.0";
}

/// CSV export
pub mod export {
    /// Stem of every exported table name (`<stem>_<collection>.csv`)
    pub const FILE_STEM: &str = "monitor_stats";

    /// Name of the downloaded archive
    pub const ARCHIVE_NAME: &str = "monitor_stats.zip";
}
