//! Default values for configuration fields
//!
//! This module centralizes all default value functions used in serde deserialization.

use crate::constants;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Default document store host
#[inline]
pub fn source_host() -> String {
    "localhost".to_string()
}

/// Default document store port
#[inline]
pub fn source_port() -> u16 {
    constants::store::DEFAULT_PORT
}

/// Default database name
#[inline]
pub fn database() -> String {
    constants::store::DEFAULT_DATABASE.to_string()
}

/// Default server selection timeout for the document store
#[inline]
pub fn source_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Default interval between poll cycles
#[inline]
pub fn poll_interval() -> Duration {
    constants::poll::INTERVAL
}

/// Default number of status updates kept
#[inline]
pub fn recent_updates_capacity() -> NonZeroUsize {
    constants::updates::DEFAULT_CAPACITY
}

/// Default HTTP listen host
#[inline]
pub fn server_host() -> String {
    constants::http::DEFAULT_HOST.to_string()
}

/// Default HTTP listen port
#[inline]
pub fn server_port() -> u16 {
    constants::http::DEFAULT_PORT
}
