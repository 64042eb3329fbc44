//! Error types for the monitor
//!
//! Missing data is not an error: "insufficient data" style outcomes are
//! ordinary report values (see `stats::TrendOutcome`).

use thiserror::Error;

/// Errors surfaced by the monitor core
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MonitorError {
    /// The backing count/update source could not be reached
    #[error("document store unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// A collection name outside the tracked set was requested
    #[error("invalid collection type: {0}")]
    InvalidCollection(String),
}

impl MonitorError {
    /// Wrap any source failure as `SourceUnavailable`
    pub fn source_unavailable(err: impl std::fmt::Display) -> Self {
        Self::SourceUnavailable {
            reason: err.to_string(),
        }
    }

    /// Check if this error was caused by client input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCollection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MonitorError::source_unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "document store unavailable: connection refused"
        );
        assert!(!err.is_client_error());

        let err = MonitorError::InvalidCollection("users".to_string());
        assert_eq!(err.to_string(), "invalid collection type: users");
        assert!(err.is_client_error());
    }
}
