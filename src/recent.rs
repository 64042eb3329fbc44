//! Bounded buffer of the most recent status updates

use crate::constants::updates::DEFAULT_CAPACITY;
use crate::types::StatusUpdate;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared FIFO of status updates with a fixed capacity
///
/// Pushing past capacity evicts the oldest entry. Clones share the same
/// buffer; readers get copies and never hold the lock.
#[derive(Debug, Clone)]
pub struct RecentUpdates {
    entries: Arc<Mutex<VecDeque<StatusUpdate>>>,
    capacity: NonZeroUsize,
}

impl RecentUpdates {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.get()))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<StatusUpdate>> {
        // Entries are plain data; a panic elsewhere cannot leave them torn
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_locked(entries: &mut VecDeque<StatusUpdate>, capacity: usize, update: StatusUpdate) {
        if entries.len() >= capacity {
            entries.pop_front();
        }
        entries.push_back(update);
    }

    /// Add an update
    pub fn push(&self, update: StatusUpdate) {
        let mut entries = self.lock();
        Self::push_locked(&mut entries, self.capacity.get(), update);
    }

    /// Add a batch of updates under a single lock
    ///
    /// Readers observe either none or all of the batch.
    pub fn extend(&self, updates: impl IntoIterator<Item = StatusUpdate>) {
        let mut entries = self.lock();
        for update in updates {
            Self::push_locked(&mut entries, self.capacity.get(), update);
        }
    }

    /// The `n` most recent updates, oldest first
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<StatusUpdate> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Every buffered update, oldest first
    #[must_use]
    pub fn all(&self) -> Vec<StatusUpdate> {
        self.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl Default for RecentUpdates {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
