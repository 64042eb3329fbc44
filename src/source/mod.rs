//! Count and status-update sources
//!
//! The monitor reads the document store only through these traits, which
//! makes it easy to swap the MongoDB implementation for the in-memory mock.

mod mock;
#[cfg(feature = "mongo")]
mod mongo;

pub use mock::MockSource;
#[cfg(feature = "mongo")]
pub use mongo::MongoSource;

use crate::error::MonitorError;
use crate::types::{CollectionName, Snapshot, StatusUpdate, UpdateId};
use async_trait::async_trait;

/// Reads the document count of a tracked collection
#[async_trait]
pub trait CountSource: Send + Sync {
    /// Fails with [`MonitorError::SourceUnavailable`] if the store is unreachable
    async fn count(&self, collection: CollectionName) -> Result<u64, MonitorError>;
}

/// Reads status updates newer than a given id
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Updates with id greater than `since` (all updates when `None`),
    /// ascending by id
    async fn fetch_since(
        &self,
        since: Option<&UpdateId>,
    ) -> Result<Vec<StatusUpdate>, MonitorError>;
}

/// Count every tracked collection
///
/// Fails as a whole if any single count fails.
pub async fn take_snapshot<S>(source: &S) -> Result<Snapshot, MonitorError>
where
    S: CountSource + ?Sized,
{
    let mut snapshot = Snapshot::default();
    for collection in CollectionName::ALL {
        snapshot.set(collection, source.count(collection).await?);
    }
    Ok(snapshot)
}
