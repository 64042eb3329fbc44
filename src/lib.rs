//! # clone-monitor
//!
//! Watches the document store of a clone-detection pipeline. A background
//! task polls four collection counts and a stream of status messages;
//! successive counts become processing-rate samples, which feed per-collection
//! histories, trend classifications, reports and CSV exports. An HTTP facade
//! serves all of it read-only.
//!
//! ## Layout
//!
//! - [`stats`]: rate tracking, aggregation, trend analysis, reports, export
//! - [`recent`]: bounded buffer of recent status updates
//! - [`source`]: count and update source traits, MongoDB and mock sources
//! - [`monitor`]: shared state, the poll cycle and facade queries
//! - [`http`]: axum routes over a [`Monitor`]
//! - [`config`], [`args`], [`logging`], [`runtime`]: process plumbing

pub mod args;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod logging;
pub mod monitor;
pub mod recent;
pub mod runtime;
pub mod source;
pub mod stats;
pub mod types;

pub use config::{Config, create_default_config, load_config, load_or_create_config};
pub use error::MonitorError;
pub use monitor::{Monitor, PollOutcome, StatsView};
pub use recent::RecentUpdates;
pub use source::{CountSource, MockSource, UpdateSource};
pub use stats::{Report, StatsAggregator, StatsEngine, TrendOutcome};
pub use types::{CollectionName, Snapshot, StatusUpdate, UpdateId};

#[cfg(feature = "mongo")]
pub use source::MongoSource;
