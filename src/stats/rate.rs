//! Rate tracking between successive count snapshots

use crate::types::{CollectionName, Snapshot};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A single throughput measurement for one collection
#[derive(Debug, Clone, PartialEq)]
pub struct RateSample {
    pub collection: CollectionName,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the previous snapshot of this collection (always > 0)
    pub elapsed_seconds: f64,
    pub total_count: u64,
    pub count_delta: u64,
    /// Items per second
    pub rate: f64,
}

#[derive(Debug, Clone, Copy)]
struct Baseline {
    count: u64,
    time: DateTime<Utc>,
}

/// Converts successive snapshots into rate samples
///
/// Owns the previous count and time per collection. The first snapshot of a
/// collection only establishes the baseline. Later snapshots emit a sample
/// when the count grew; a stall or a decrease (data reset) emits nothing.
/// The baseline always advances to the latest snapshot.
#[derive(Debug, Clone, Default)]
pub struct RateTracker {
    baselines: BTreeMap<CollectionName, Baseline>,
}

impl RateTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one snapshot taken at `now`, returning the samples it produced
    ///
    /// Collections absent from the snapshot are left untouched.
    pub fn update(&mut self, snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<RateSample> {
        let mut samples = Vec::new();

        for collection in CollectionName::ALL {
            if !snapshot.contains(collection) {
                continue;
            }
            let count = snapshot.get(collection);

            if let Some(previous) = self.baselines.get(&collection)
                && let Some(sample) = Self::measure(collection, previous, count, now)
            {
                samples.push(sample);
            }

            self.baselines
                .insert(collection, Baseline { count, time: now });
        }

        samples
    }

    fn measure(
        collection: CollectionName,
        previous: &Baseline,
        count: u64,
        now: DateTime<Utc>,
    ) -> Option<RateSample> {
        let count_delta = count.checked_sub(previous.count).filter(|d| *d > 0)?;
        let elapsed_seconds = (now - previous.time).num_microseconds()? as f64 / 1_000_000.0;
        if elapsed_seconds <= 0.0 {
            return None;
        }

        Some(RateSample {
            collection,
            timestamp: now,
            elapsed_seconds,
            total_count: count,
            count_delta,
            rate: count_delta as f64 / elapsed_seconds,
        })
    }

    /// Latest observed count per collection (0 before the first snapshot)
    #[must_use]
    pub fn latest_counts(&self) -> Snapshot {
        CollectionName::ALL
            .into_iter()
            .map(|c| (c, self.baselines.get(&c).map_or(0, |b| b.count)))
            .collect()
    }

    /// Whether a baseline exists for this collection
    #[must_use]
    pub fn has_baseline(&self, collection: CollectionName) -> bool {
        self.baselines.contains_key(&collection)
    }
}
