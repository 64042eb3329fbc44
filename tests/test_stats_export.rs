//! Tests for report serialization and the CSV/zip export
//!
//! These go through the public JSON shape the dashboard consumes.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use clone_monitor::constants::export::FILE_STEM;
use clone_monitor::stats::{CSV_HEADER, StatsEngine, package_archive};
use clone_monitor::{CollectionName, Snapshot};
use serde_json::json;
use std::io::{Cursor, Read};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
}

fn engine_with_history() -> StatsEngine {
    let mut engine = StatsEngine::default();
    engine.observe(&Snapshot::zeroed(), at(0));
    engine.observe(
        &Snapshot::zeroed()
            .with(CollectionName::Files, 10)
            .with(CollectionName::Candidates, 8)
            .with(CollectionName::Clones, 2),
        at(5),
    );
    engine.observe(
        &Snapshot::zeroed()
            .with(CollectionName::Files, 25)
            .with(CollectionName::Candidates, 20)
            .with(CollectionName::Clones, 5),
        at(10),
    );
    engine
}

#[test]
fn test_empty_report_json() -> Result<()> {
    let engine = StatsEngine::default();
    let value = serde_json::to_value(engine.full_report(at(0)))?;

    assert_eq!(value["summary"], json!({ "total_processed": {}, "average_rates": {} }));
    assert_eq!(value["analysis"], json!({}));
    assert_eq!(value["predictions"], json!({}));
    assert_eq!(value["raw_data"], json!({}));

    Ok(())
}

#[test]
fn test_full_report_json_shape() -> Result<()> {
    let engine = engine_with_history();
    let value = serde_json::to_value(engine.full_report(at(10)))?;

    assert_eq!(value["summary"]["total_processed"]["files"], 25);
    assert_eq!(value["summary"]["average_rates"]["files"]["avg_rate"], 2.5);
    assert_eq!(value["summary"]["average_rates"]["chunks"]["avg_rate"], 0.0);

    assert_eq!(value["analysis"]["files_generation"]["trend"], "increasing");
    assert_eq!(value["analysis"]["chunks_generation"], "Insufficient data");
    assert_eq!(value["predictions"]["avg_clone_size"], 4.0);
    assert!(value["predictions"].get("avg_chunks_per_file").is_none());

    let files = value["raw_data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1]["count"], 25);
    assert_eq!(files[1]["count_diff"], 15);
    assert_eq!(files[1]["rate"], 3.0);
    assert!(value["raw_data"].get("chunks").is_none());

    Ok(())
}

#[test]
fn test_collection_report_predictions_default_to_zero() -> Result<()> {
    let engine = engine_with_history();

    let chunks = serde_json::to_value(engine.collection_report(CollectionName::Chunks))?;
    assert_eq!(chunks["predictions"], json!({ "avg_chunks_per_file": 0.0 }));
    assert_eq!(chunks["analysis"], "Insufficient data");

    let clones = serde_json::to_value(engine.collection_report(CollectionName::Clones))?;
    assert_eq!(clones["predictions"], json!({ "avg_clone_size": 4.0 }));
    assert_eq!(clones["summary"]["total_count"], 5);

    Ok(())
}

#[test]
fn test_export_archive_contents() -> Result<()> {
    let engine = engine_with_history();
    let tables = engine.aggregator().export_tables();
    let names: Vec<CollectionName> = tables.iter().map(|t| t.collection).collect();
    assert_eq!(
        names,
        vec![
            CollectionName::Files,
            CollectionName::Candidates,
            CollectionName::Clones
        ]
    );

    let bytes = package_archive(&tables, FILE_STEM)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    assert_eq!(archive.len(), 3);

    let mut csv = String::new();
    archive
        .by_name("monitor_stats_files.csv")?
        .read_to_string(&mut csv)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 3);
    assert!(lines[2].ends_with(",5,25,15,3"));

    Ok(())
}

#[test]
fn test_export_without_history_is_empty() -> Result<()> {
    let engine = StatsEngine::default();
    let tables = engine.aggregator().export_tables();
    assert!(tables.is_empty());

    let bytes = package_archive(&tables, FILE_STEM)?;
    let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    assert_eq!(archive.len(), 0);

    Ok(())
}
