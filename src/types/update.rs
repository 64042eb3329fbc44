//! Status messages published by the clone detector

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-assigned status update identifier
///
/// Ordering is the source's ordering: for document-store object ids the
/// fixed-width lowercase hex form sorts the same way as the raw id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateId(String);

impl UpdateId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: UpdateId,
    /// Timestamp as rendered by the source
    pub timestamp: String,
    pub message: String,
}

impl StatusUpdate {
    #[must_use]
    pub fn new(id: UpdateId, timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }
}
