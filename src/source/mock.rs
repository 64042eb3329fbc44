//! In-memory source for tests and demos
//!
//! Counts and status updates are set directly. Availability can be toggled
//! to simulate an unreachable store, either entirely or for one collection.

use super::{CountSource, UpdateSource};
use crate::error::MonitorError;
use crate::types::{CollectionName, Snapshot, StatusUpdate, UpdateId};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MockState {
    counts: Snapshot,
    updates: Vec<StatusUpdate>,
    next_id: u64,
    unavailable: bool,
    failing_collection: Option<CollectionName>,
}

/// Scriptable in-memory count and update source
///
/// Clones share state, so a test can keep a handle while the monitor owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    state: Arc<Mutex<MockState>>,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_count(&self, collection: CollectionName, count: u64) {
        self.state().counts.set(collection, count);
    }

    pub fn add_count(&self, collection: CollectionName, delta: u64) {
        let mut state = self.state();
        let current = state.counts.get(collection);
        state.counts.set(collection, current + delta);
    }

    /// Append a status update with the next sequential id
    pub fn push_update(&self, timestamp: &str, message: &str) -> UpdateId {
        let mut state = self.state();
        state.next_id += 1;
        // Zero-padded so string order matches numeric order
        let id = UpdateId::new(format!("{:024}", state.next_id));
        state
            .updates
            .push(StatusUpdate::new(id.clone(), timestamp, message));
        id
    }

    /// Make every call fail (`false`) or succeed again (`true`)
    pub fn set_available(&self, available: bool) {
        self.state().unavailable = !available;
    }

    /// Make counting a single collection fail
    pub fn fail_collection(&self, collection: Option<CollectionName>) {
        self.state().failing_collection = collection;
    }
}

#[async_trait]
impl CountSource for MockSource {
    async fn count(&self, collection: CollectionName) -> Result<u64, MonitorError> {
        let state = self.state();
        if state.unavailable || state.failing_collection == Some(collection) {
            return Err(MonitorError::source_unavailable(format!(
                "mock store refused count of '{collection}'"
            )));
        }
        Ok(state.counts.get(collection))
    }
}

#[async_trait]
impl UpdateSource for MockSource {
    async fn fetch_since(
        &self,
        since: Option<&UpdateId>,
    ) -> Result<Vec<StatusUpdate>, MonitorError> {
        let state = self.state();
        if state.unavailable {
            return Err(MonitorError::source_unavailable(
                "mock store refused update query",
            ));
        }

        let mut updates: Vec<StatusUpdate> = state
            .updates
            .iter()
            .filter(|u| since.is_none_or(|id| u.id > *id))
            .cloned()
            .collect();
        updates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_since_filters_seen_ids() {
        let source = MockSource::new();
        let first = source.push_update("t1", "one");
        source.push_update("t2", "two");

        assert_eq!(source.fetch_since(None).await.unwrap().len(), 2);

        let newer = source.fetch_since(Some(&first)).await.unwrap();
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].message, "two");
    }

    #[tokio::test]
    async fn test_unavailable_source_fails() {
        let source = MockSource::new();
        source.set_available(false);
        assert!(source.count(CollectionName::Files).await.is_err());
        assert!(source.fetch_since(None).await.is_err());

        source.set_available(true);
        assert_eq!(source.count(CollectionName::Files).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_count() {
        let source = MockSource::new();
        source.add_count(CollectionName::Chunks, 5);
        source.add_count(CollectionName::Chunks, 7);
        assert_eq!(source.count(CollectionName::Chunks).await.unwrap(), 12);
    }
}
