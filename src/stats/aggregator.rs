//! Accumulation of rate samples into histories, summaries and reports

use super::rate::RateSample;
use super::report::{
    AverageRate, CollectionPredictions, CollectionReport, CollectionSummary, GenerationKey,
    HistoryEntry, Predictions, RateLogEntry, RatePoint, RatesView, Report, Summary,
};
use super::trend::TrendOutcome;
use crate::types::{CollectionName, Snapshot};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroUsize;

/// Per-collection detailed histories plus the flat chronological rate log
///
/// Retention: with no limit (the default) everything recorded is kept for
/// the lifetime of the aggregator. With a limit, each history and the rate
/// log keep only their newest `limit` entries.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    histories: BTreeMap<CollectionName, VecDeque<HistoryEntry>>,
    rate_log: VecDeque<RateLogEntry>,
    limit: Option<NonZeroUsize>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with an optional retention cap
    #[must_use]
    pub fn with_history_limit(limit: Option<NonZeroUsize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Append one sample to its collection history and to the rate log
    pub fn record(&mut self, sample: &RateSample) {
        let history = self.histories.entry(sample.collection).or_default();
        history.push_back(HistoryEntry::from(sample));
        self.rate_log.push_back(RateLogEntry::from(sample));

        if let Some(limit) = self.limit {
            Self::truncate_front(history, limit.get());
            Self::truncate_front(&mut self.rate_log, limit.get());
        }
    }

    pub fn record_all<'a>(&mut self, samples: impl IntoIterator<Item = &'a RateSample>) {
        for sample in samples {
            self.record(sample);
        }
    }

    fn truncate_front<T>(entries: &mut VecDeque<T>, limit: usize) {
        let excess = entries.len().saturating_sub(limit);
        entries.drain(..excess);
    }

    /// Whether any collection has recorded history
    #[must_use]
    pub fn has_history(&self) -> bool {
        self.histories.values().any(|h| !h.is_empty())
    }

    /// Detailed history of one collection, oldest first
    pub fn history(&self, collection: CollectionName) -> impl Iterator<Item = &HistoryEntry> {
        self.histories.get(&collection).into_iter().flatten()
    }

    /// Number of history entries recorded for a collection
    #[must_use]
    pub fn history_len(&self, collection: CollectionName) -> usize {
        self.histories.get(&collection).map_or(0, VecDeque::len)
    }

    /// Rates recorded for a collection, oldest first
    #[must_use]
    pub fn rates(&self, collection: CollectionName) -> Vec<f64> {
        self.history(collection).map(|e| e.rate).collect()
    }

    fn latest_history_count(&self, collection: CollectionName) -> Option<u64> {
        self.histories
            .get(&collection)
            .and_then(VecDeque::back)
            .map(|e| e.count)
    }

    /// Mean rate of a collection (0 with no history)
    #[must_use]
    pub fn average_rate(&self, collection: CollectionName) -> f64 {
        let rates = self.rates(collection);
        if rates.is_empty() {
            0.0
        } else {
            rates.iter().sum::<f64>() / rates.len() as f64
        }
    }

    /// Latest counts and mean rates for every collection
    ///
    /// `latest` is the most recent snapshot seen by the rate tracker.
    #[must_use]
    pub fn summary(&self, latest: &Snapshot) -> Summary {
        let total_processed = CollectionName::ALL
            .into_iter()
            .map(|c| (c, latest.get(c)))
            .collect();
        let average_rates = CollectionName::ALL
            .into_iter()
            .map(|c| {
                (
                    c,
                    AverageRate {
                        avg_rate: self.average_rate(c),
                        total_count: latest.get(c),
                    },
                )
            })
            .collect();

        Summary {
            total_processed,
            average_rates,
        }
    }

    /// Trend classification (or data-shortage marker) for one collection
    #[must_use]
    pub fn trend_for(&self, collection: CollectionName) -> TrendOutcome {
        TrendOutcome::classify(&self.rates(collection))
    }

    /// Trend outcome of every collection, keyed `"<collection>_generation"`
    #[must_use]
    pub fn analysis(&self) -> BTreeMap<GenerationKey, TrendOutcome> {
        CollectionName::ALL
            .into_iter()
            .map(|c| (GenerationKey(c), self.trend_for(c)))
            .collect()
    }

    /// Human-readable trend lines; empty until some collection has history
    #[must_use]
    pub fn trend_summary(&self) -> BTreeMap<GenerationKey, String> {
        if !self.has_history() {
            return BTreeMap::new();
        }
        self.analysis()
            .into_iter()
            .map(|(key, outcome)| (key, outcome.describe()))
            .collect()
    }

    /// Cross-collection ratios from the latest history entries
    ///
    /// A ratio is present only when both collections have history and the
    /// divisor is positive.
    #[must_use]
    pub fn predictions(&self) -> Predictions {
        Predictions {
            avg_chunks_per_file: self.ratio(CollectionName::Chunks, CollectionName::Files),
            avg_clone_size: self.ratio(CollectionName::Candidates, CollectionName::Clones),
        }
    }

    fn ratio(&self, numerator: CollectionName, divisor: CollectionName) -> Option<f64> {
        let divisor = self.latest_history_count(divisor).filter(|d| *d > 0)?;
        let numerator = self.latest_history_count(numerator)?;
        Some(numerator as f64 / divisor as f64)
    }

    /// Compose the full report
    ///
    /// With no history anywhere, every section of the report is empty.
    #[must_use]
    pub fn full_report(&self, latest: &Snapshot, now: DateTime<Utc>) -> Report {
        if !self.has_history() {
            return Report::empty(now);
        }

        Report {
            timestamp: now,
            summary: self.summary(latest),
            analysis: self.analysis(),
            predictions: self.predictions(),
            raw_data: self
                .histories
                .iter()
                .filter(|(_, h)| !h.is_empty())
                .map(|(c, h)| (*c, h.iter().cloned().collect()))
                .collect(),
        }
    }

    /// Report slice for a single collection
    #[must_use]
    pub fn collection_report(
        &self,
        collection: CollectionName,
        latest: &Snapshot,
    ) -> CollectionReport {
        if !self.has_history() {
            return CollectionReport::default();
        }

        let predictions = self.predictions();
        let predictions = match collection {
            CollectionName::Chunks => CollectionPredictions {
                avg_chunks_per_file: Some(predictions.avg_chunks_per_file.unwrap_or(0.0)),
                ..Default::default()
            },
            CollectionName::Clones => CollectionPredictions {
                avg_clone_size: Some(predictions.avg_clone_size.unwrap_or(0.0)),
                ..Default::default()
            },
            CollectionName::Files | CollectionName::Candidates => {
                CollectionPredictions::default()
            }
        };

        CollectionReport {
            summary: CollectionSummary {
                total_count: latest.get(collection),
                average_rate: AverageRate {
                    avg_rate: self.average_rate(collection),
                    total_count: latest.get(collection),
                },
            },
            analysis: Some(self.trend_for(collection)),
            predictions,
            raw_data: self.history(collection).cloned().collect(),
        }
    }

    /// Chronological rate series for charting
    #[must_use]
    pub fn rates_view(&self) -> RatesView {
        let mut view = RatesView::default();
        for entry in &self.rate_log {
            view.timestamps
                .push(entry.timestamp.timestamp_micros() as f64 / 1_000_000.0);
            view.collections
                .entry(entry.collection)
                .or_default()
                .push(RatePoint {
                    rate: entry.rate,
                    total_items: entry.total_items,
                });
        }
        view
    }

    /// Number of entries in the flat rate log
    #[must_use]
    pub fn rate_log_len(&self) -> usize {
        self.rate_log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(collection: CollectionName, secs: i64, total: u64, rate: f64) -> RateSample {
        RateSample {
            collection,
            timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            elapsed_seconds: 5.0,
            total_count: total,
            count_delta: (rate * 5.0) as u64,
            rate,
        }
    }

    #[test]
    fn test_summary_without_history() {
        let aggregator = StatsAggregator::new();
        let summary = aggregator.summary(&Snapshot::zeroed());

        for collection in CollectionName::ALL {
            assert_eq!(summary.total_processed[&collection], 0);
            assert_eq!(
                summary.average_rates[&collection],
                AverageRate {
                    avg_rate: 0.0,
                    total_count: 0
                }
            );
        }
    }

    #[test]
    fn test_summary_averages_rates() {
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&sample(CollectionName::Files, 5, 10, 2.0));
        aggregator.record(&sample(CollectionName::Files, 10, 25, 3.0));

        let latest = Snapshot::zeroed().with(CollectionName::Files, 25);
        let summary = aggregator.summary(&latest);
        assert_eq!(summary.average_rates[&CollectionName::Files].avg_rate, 2.5);
        assert_eq!(summary.average_rates[&CollectionName::Files].total_count, 25);
        assert_eq!(summary.average_rates[&CollectionName::Chunks].avg_rate, 0.0);
    }

    #[test]
    fn test_trend_markers() {
        let mut aggregator = StatsAggregator::new();
        assert_eq!(
            aggregator.trend_for(CollectionName::Files),
            TrendOutcome::InsufficientData
        );

        aggregator.record(&sample(CollectionName::Files, 5, 10, 0.0));
        aggregator.record(&sample(CollectionName::Files, 10, 10, 0.0));
        assert_eq!(
            aggregator.trend_for(CollectionName::Files),
            TrendOutcome::NoValidRates
        );
    }

    #[test]
    fn test_predictions_require_both_histories() {
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&sample(CollectionName::Chunks, 5, 300, 1.0));
        assert!(aggregator.predictions().avg_chunks_per_file.is_none());

        aggregator.record(&sample(CollectionName::Files, 5, 100, 1.0));
        assert_eq!(aggregator.predictions().avg_chunks_per_file, Some(3.0));
        assert!(aggregator.predictions().avg_clone_size.is_none());
    }

    #[test]
    fn test_predictions_skip_zero_divisor() {
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&sample(CollectionName::Candidates, 5, 40, 1.0));
        aggregator.record(&sample(CollectionName::Clones, 5, 0, 1.0));
        assert!(aggregator.predictions().avg_clone_size.is_none());
    }

    #[test]
    fn test_history_limit_drops_oldest() {
        let mut aggregator = StatsAggregator::with_history_limit(NonZeroUsize::new(2));
        for i in 1..=3 {
            aggregator.record(&sample(CollectionName::Files, i * 5, i as u64 * 10, i as f64));
        }

        assert_eq!(aggregator.history_len(CollectionName::Files), 2);
        assert_eq!(aggregator.rates(CollectionName::Files), vec![2.0, 3.0]);
        assert_eq!(aggregator.rate_log_len(), 2);
    }

    #[test]
    fn test_rates_view_groups_by_collection() {
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&sample(CollectionName::Files, 5, 10, 2.0));
        aggregator.record(&sample(CollectionName::Chunks, 5, 50, 10.0));
        aggregator.record(&sample(CollectionName::Files, 10, 25, 3.0));

        let view = aggregator.rates_view();
        assert_eq!(view.timestamps.len(), 3);
        assert_eq!(view.timestamps[0], 1_700_000_005.0);
        assert_eq!(view.collections[&CollectionName::Files].len(), 2);
        assert_eq!(
            view.collections[&CollectionName::Chunks][0],
            RatePoint {
                rate: 10.0,
                total_items: 50
            }
        );
    }

    #[test]
    fn test_trend_summary_empty_until_history() {
        let mut aggregator = StatsAggregator::new();
        assert!(aggregator.trend_summary().is_empty());

        aggregator.record(&sample(CollectionName::Files, 5, 10, 2.0));
        let trends = aggregator.trend_summary();
        assert_eq!(trends.len(), 4);
        assert_eq!(
            trends[&GenerationKey(CollectionName::Files)],
            "Insufficient data"
        );
    }
}
