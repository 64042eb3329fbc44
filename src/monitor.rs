//! Top-level monitor: shared state, poll cycle and facade queries
//!
//! One background task writes (see [`Monitor::spawn_poller`]); request
//! handlers read concurrently. Reads take a short read lock and return
//! owned copies, so handlers never observe a half-applied poll cycle.

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::recent::RecentUpdates;
use crate::source::{CountSource, UpdateSource, take_snapshot};
use crate::stats::{
    CollectionReport, CollectionTable, GenerationKey, RatesView, Report, StatsEngine,
};
use crate::types::{CollectionName, Snapshot, StatusUpdate, UpdateId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// What one successful poll cycle changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// Rate samples recorded
    pub samples: usize,
    /// Status updates buffered
    pub updates: usize,
}

/// Combined dashboard view
#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub counts: Snapshot,
    pub rates: RatesView,
    pub updates: Vec<StatusUpdate>,
    pub trends: BTreeMap<GenerationKey, String>,
}

/// Polls the document store and serves statistics about it
pub struct Monitor {
    count_source: Arc<dyn CountSource>,
    update_source: Arc<dyn UpdateSource>,
    stats: RwLock<StatsEngine>,
    recent: RecentUpdates,
    /// Highest status update id seen; held for a whole cycle so cycles never overlap
    last_seen_id: Mutex<Option<UpdateId>>,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("recent_updates", &self.recent.len())
            .finish_non_exhaustive()
    }
}

impl Monitor {
    /// Create a monitor over separate count and update sources
    pub fn new(
        count_source: Arc<dyn CountSource>,
        update_source: Arc<dyn UpdateSource>,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            count_source,
            update_source,
            stats: RwLock::new(StatsEngine::new(config.history_limit)),
            recent: RecentUpdates::new(config.recent_updates_capacity),
            last_seen_id: Mutex::new(None),
        }
    }

    /// Create a monitor over a source providing both counts and updates
    pub fn with_source<S>(source: S, config: &MonitorConfig) -> Self
    where
        S: CountSource + UpdateSource + 'static,
    {
        let source = Arc::new(source);
        Self::new(source.clone(), source, config)
    }

    fn stats(&self) -> RwLockReadGuard<'_, StatsEngine> {
        self.stats.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn stats_mut(&self) -> RwLockWriteGuard<'_, StatsEngine> {
        self.stats.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one poll cycle now
    pub async fn poll_once(&self) -> Result<PollOutcome, MonitorError> {
        self.poll_at(Utc::now()).await
    }

    /// Run one poll cycle, stamping samples with `now`
    ///
    /// All source reads happen before any state changes. If one fails, the
    /// cycle is abandoned and every piece of state is left as it was.
    pub async fn poll_at(&self, now: DateTime<Utc>) -> Result<PollOutcome, MonitorError> {
        let mut last_seen = self.last_seen_id.lock().await;

        let snapshot = take_snapshot(self.count_source.as_ref()).await?;
        let updates = self.update_source.fetch_since(last_seen.as_ref()).await?;

        let samples = self.stats_mut().observe(&snapshot, now);
        if let Some(newest) = updates.last() {
            *last_seen = Some(newest.id.clone());
        }
        let update_count = updates.len();
        self.recent.extend(updates);

        Ok(PollOutcome {
            samples,
            updates: update_count,
        })
    }

    /// Start the background poll loop
    ///
    /// The first cycle runs immediately. Failed cycles are logged and
    /// skipped. The task is detached; dropping the handle does not stop it.
    pub fn spawn_poller(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        info!("Polling document store every {:?}", interval);
        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.poll_once().await {
                    Ok(outcome) => debug!(
                        "Poll cycle recorded {} rate samples and {} status updates",
                        outcome.samples, outcome.updates
                    ),
                    Err(e) => warn!("Skipping poll cycle: {}", e),
                }
            }
        })
    }

    /// Counts recorded by the latest successful poll (zeros before the first)
    #[must_use]
    pub fn counts(&self) -> Snapshot {
        self.stats().latest_counts()
    }

    #[must_use]
    pub fn rates(&self) -> RatesView {
        self.stats().aggregator().rates_view()
    }

    /// The `limit` most recent status updates, oldest first
    #[must_use]
    pub fn recent_updates(&self, limit: usize) -> Vec<StatusUpdate> {
        self.recent.latest(limit)
    }

    #[must_use]
    pub fn trend_summary(&self) -> BTreeMap<GenerationKey, String> {
        self.stats().aggregator().trend_summary()
    }

    #[must_use]
    pub fn full_report(&self) -> Report {
        self.stats().full_report(Utc::now())
    }

    /// Report slice for a collection given by name
    pub fn collection_report(&self, collection: &str) -> Result<CollectionReport, MonitorError> {
        let collection: CollectionName = collection.parse()?;
        Ok(self.stats().collection_report(collection))
    }

    /// CSV tables for every collection with history
    #[must_use]
    pub fn export_tables(&self) -> Vec<CollectionTable> {
        self.stats().aggregator().export_tables()
    }

    /// Counts, rates, trends and recent updates in one view
    #[must_use]
    pub fn stats_view(&self, update_limit: usize) -> StatsView {
        let (counts, rates, trends) = {
            let stats = self.stats();
            (
                stats.latest_counts(),
                stats.aggregator().rates_view(),
                stats.aggregator().trend_summary(),
            )
        };

        StatsView {
            counts,
            rates,
            updates: self.recent.latest(update_limit),
            trends,
        }
    }
}
