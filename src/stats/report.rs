//! Report value types
//!
//! These are point-in-time copies built by the aggregator. Field names are
//! the JSON names consumed by the dashboard.

use super::rate::RateSample;
use super::trend::TrendOutcome;
use crate::types::CollectionName;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// One row of a collection's detailed history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    /// Seconds since the previous snapshot
    pub time_diff: f64,
    pub count: u64,
    pub count_diff: u64,
    pub rate: f64,
}

impl From<&RateSample> for HistoryEntry {
    fn from(sample: &RateSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            time_diff: sample.elapsed_seconds,
            count: sample.total_count,
            count_diff: sample.count_delta,
            rate: sample.rate,
        }
    }
}

/// Entry of the flat, cross-collection rate log
#[derive(Debug, Clone, PartialEq)]
pub struct RateLogEntry {
    pub timestamp: DateTime<Utc>,
    pub collection: CollectionName,
    pub rate: f64,
    pub total_items: u64,
}

impl From<&RateSample> for RateLogEntry {
    fn from(sample: &RateSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            collection: sample.collection,
            rate: sample.rate,
            total_items: sample.total_count,
        }
    }
}

/// Point of the per-collection rate series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePoint {
    pub rate: f64,
    pub total_items: u64,
}

/// Time-series view of the rate log for charting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatesView {
    /// Seconds since the Unix epoch, one per rate log entry
    pub timestamps: Vec<f64>,
    pub collections: BTreeMap<CollectionName, Vec<RatePoint>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageRate {
    pub avg_rate: f64,
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_processed: BTreeMap<CollectionName, u64>,
    pub average_rates: BTreeMap<CollectionName, AverageRate>,
}

/// Cross-collection ratios; a ratio is absent when it cannot be computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Predictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_chunks_per_file: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_clone_size: Option<f64>,
}

impl Predictions {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.avg_chunks_per_file.is_none() && self.avg_clone_size.is_none()
    }
}

/// Analysis map key, rendered as `"<collection>_generation"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationKey(pub CollectionName);

impl Serialize for GenerationKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.generation_key())
    }
}

/// Full analysis report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub summary: Summary,
    pub analysis: BTreeMap<GenerationKey, TrendOutcome>,
    pub predictions: Predictions,
    /// Detailed history of each collection that has any
    pub raw_data: BTreeMap<CollectionName, Vec<HistoryEntry>>,
}

impl Report {
    /// Report with every section empty
    #[must_use]
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            summary: Summary::default(),
            analysis: BTreeMap::new(),
            predictions: Predictions::default(),
            raw_data: BTreeMap::new(),
        }
    }

    /// Trend outcome for one collection
    #[must_use]
    pub fn analysis_for(&self, collection: CollectionName) -> Option<&TrendOutcome> {
        self.analysis.get(&GenerationKey(collection))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub total_count: u64,
    pub average_rate: AverageRate,
}

/// Predictions relevant to a single collection
///
/// Unlike [`Predictions`], an unavailable ratio is reported as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CollectionPredictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_chunks_per_file: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_clone_size: Option<f64>,
}

/// Slice of the report for one collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionReport {
    pub summary: CollectionSummary,
    /// `None` when no collection has recorded history yet
    pub analysis: Option<TrendOutcome>,
    pub predictions: CollectionPredictions,
    pub raw_data: Vec<HistoryEntry>,
}
