//! Statistics engine
//!
//! Turns successive count snapshots into rate samples, keeps per-collection
//! histories, classifies trends and builds reports and export tables.
//! Everything in here is synchronous and pure; sharing across tasks is the
//! job of [`crate::Monitor`].

mod aggregator;
mod export;
mod rate;
mod report;
mod trend;

pub use aggregator::StatsAggregator;
pub use export::{CSV_HEADER, CollectionTable, package_archive, render_csv};
pub use rate::{RateSample, RateTracker};
pub use report::{
    AverageRate, CollectionPredictions, CollectionReport, CollectionSummary, GenerationKey,
    HistoryEntry, Predictions, RateLogEntry, RatePoint, RatesView, Report, Summary,
};
pub use trend::{Direction, Pattern, TrendClassification, TrendOutcome};

use crate::types::{CollectionName, Snapshot};
use chrono::{DateTime, Utc};
use std::num::NonZeroUsize;

/// Rate tracker and aggregator updated together
///
/// The tracker owns the per-collection baselines, the aggregator owns the
/// histories. Feeding both through [`StatsEngine::observe`] keeps them in
/// step for every snapshot.
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    tracker: RateTracker,
    aggregator: StatsAggregator,
}

impl StatsEngine {
    #[must_use]
    pub fn new(history_limit: Option<NonZeroUsize>) -> Self {
        Self {
            tracker: RateTracker::new(),
            aggregator: StatsAggregator::with_history_limit(history_limit),
        }
    }

    /// Feed one snapshot, returning the number of samples recorded
    pub fn observe(&mut self, snapshot: &Snapshot, now: DateTime<Utc>) -> usize {
        let samples = self.tracker.update(snapshot, now);
        self.aggregator.record_all(&samples);
        samples.len()
    }

    #[must_use]
    pub fn latest_counts(&self) -> Snapshot {
        self.tracker.latest_counts()
    }

    #[must_use]
    pub fn aggregator(&self) -> &StatsAggregator {
        &self.aggregator
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        self.aggregator.summary(&self.latest_counts())
    }

    #[must_use]
    pub fn trend_for(&self, collection: CollectionName) -> TrendOutcome {
        self.aggregator.trend_for(collection)
    }

    #[must_use]
    pub fn full_report(&self, now: DateTime<Utc>) -> Report {
        self.aggregator.full_report(&self.latest_counts(), now)
    }

    #[must_use]
    pub fn collection_report(&self, collection: CollectionName) -> CollectionReport {
        self.aggregator
            .collection_report(collection, &self.latest_counts())
    }
}
