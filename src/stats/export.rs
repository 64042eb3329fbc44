//! Tabular export of detailed histories
//!
//! Produces one CSV table per collection with history, and packs tables
//! into a single zip archive for download.

use super::aggregator::StatsAggregator;
use super::report::HistoryEntry;
use crate::types::CollectionName;
use chrono::SecondsFormat;
use std::fmt::Write as _;
use std::io::{Cursor, Write as _};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Column header of every exported table
pub const CSV_HEADER: &str = "timestamp,time_diff,count,count_diff,rate";

/// One exported table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTable {
    pub collection: CollectionName,
    pub bytes: Vec<u8>,
}

impl CollectionTable {
    /// File name for this table, e.g. `monitor_stats_files.csv`
    #[must_use]
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}_{}.csv", stem, self.collection)
    }
}

/// Render history rows as CSV, header first
#[must_use]
pub fn render_csv<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let mut output = String::with_capacity(256);
    output.push_str(CSV_HEADER);
    output.push('\n');

    for entry in entries {
        // Writing to a String cannot fail
        let _ = writeln!(
            output,
            "{},{},{},{},{}",
            entry
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            entry.time_diff,
            entry.count,
            entry.count_diff,
            entry.rate
        );
    }

    output
}

impl StatsAggregator {
    /// One CSV table per collection with non-empty history, in report order
    ///
    /// Returns an empty list when nothing has been recorded.
    #[must_use]
    pub fn export_tables(&self) -> Vec<CollectionTable> {
        CollectionName::ALL
            .into_iter()
            .filter(|c| self.history_len(*c) > 0)
            .map(|collection| CollectionTable {
                collection,
                bytes: render_csv(self.history(collection)).into_bytes(),
            })
            .collect()
    }
}

/// Pack tables into an in-memory zip archive named `<stem>_<collection>.csv`
pub fn package_archive(tables: &[CollectionTable], stem: &str) -> ZipResult<Vec<u8>> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    for table in tables {
        archive.start_file(table.file_name(stem), FileOptions::default())?;
        archive.write_all(&table.bytes)?;
    }
    Ok(archive.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::RateSample;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_aggregator_exports_nothing() {
        assert!(StatsAggregator::new().export_tables().is_empty());
    }

    #[test]
    fn test_csv_layout() {
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&RateSample {
            collection: CollectionName::Clones,
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            elapsed_seconds: 5.0,
            total_count: 12,
            count_delta: 10,
            rate: 2.0,
        });

        let tables = aggregator.export_tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].collection, CollectionName::Clones);
        assert_eq!(
            tables[0].file_name("monitor_stats"),
            "monitor_stats_clones.csv"
        );

        let text = String::from_utf8(tables[0].bytes.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "2023-11-14T22:13:20.000000Z,5,12,10,2");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_archive_contains_one_file_per_table() {
        let tables = vec![
            CollectionTable {
                collection: CollectionName::Files,
                bytes: b"files".to_vec(),
            },
            CollectionTable {
                collection: CollectionName::Chunks,
                bytes: b"chunks".to_vec(),
            },
        ];

        let bytes = package_archive(&tables, "monitor_stats").unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut contents = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("monitor_stats_chunks.csv").unwrap(),
            &mut contents,
        )
        .unwrap();
        assert_eq!(contents, "chunks");
    }
}
