//! Tracked collection names and count snapshots

use crate::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the four document-store collections the monitor tracks
///
/// Variant order is the report key order (`Ord` is derived from it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    Files,
    Chunks,
    Candidates,
    Clones,
}

impl CollectionName {
    /// All tracked collections in report order
    pub const ALL: [Self; 4] = [Self::Files, Self::Chunks, Self::Candidates, Self::Clones];

    /// Collection name as stored in the document store
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Chunks => "chunks",
            Self::Candidates => "candidates",
            Self::Clones => "clones",
        }
    }

    /// Key used for this collection in the report's analysis section
    #[must_use]
    pub fn generation_key(&self) -> String {
        format!("{}_generation", self.as_str())
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| MonitorError::InvalidCollection(s.to_string()))
    }
}

/// Counts of every tracked collection taken at a single instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<CollectionName, u64>);

impl Snapshot {
    /// Snapshot with every collection at zero
    #[must_use]
    pub fn zeroed() -> Self {
        CollectionName::ALL.into_iter().map(|c| (c, 0)).collect()
    }

    /// Count for a collection (0 if the snapshot does not carry it)
    #[must_use]
    #[inline]
    pub fn get(&self, collection: CollectionName) -> u64 {
        self.0.get(&collection).copied().unwrap_or(0)
    }

    /// Set the count for a collection
    pub fn set(&mut self, collection: CollectionName, count: u64) {
        self.0.insert(collection, count);
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, collection: CollectionName, count: u64) -> Self {
        self.set(collection, count);
        self
    }

    /// Whether the snapshot carries a count for this collection
    #[must_use]
    pub fn contains(&self, collection: CollectionName) -> bool {
        self.0.contains_key(&collection)
    }

    /// Iterate over (collection, count) pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (CollectionName, u64)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}

impl FromIterator<(CollectionName, u64)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (CollectionName, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
