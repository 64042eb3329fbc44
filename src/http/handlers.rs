use super::error::ApiError;
use crate::constants;
use crate::monitor::{Monitor, StatsView};
use crate::stats::{CollectionReport, Report, package_archive};
use crate::types::StatusUpdate;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;
use std::sync::Arc;

/// Query string of `/api/updates`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UpdatesQuery {
    pub limit: Option<usize>,
}

pub(super) async fn banner() -> &'static str {
    concat!("clone-monitor ", env!("CARGO_PKG_VERSION"), "\n")
}

pub(super) async fn stats(State(monitor): State<Arc<Monitor>>) -> Json<StatsView> {
    Json(monitor.stats_view(constants::updates::STATS_LIMIT))
}

pub(super) async fn updates(
    State(monitor): State<Arc<Monitor>>,
    Query(params): Query<UpdatesQuery>,
) -> Json<Vec<StatusUpdate>> {
    let limit = params.limit.unwrap_or(constants::updates::DEFAULT_LIMIT);
    Json(monitor.recent_updates(limit))
}

pub(super) async fn report(State(monitor): State<Arc<Monitor>>) -> Json<Report> {
    Json(monitor.full_report())
}

pub(super) async fn collection_report(
    State(monitor): State<Arc<Monitor>>,
    Path(collection): Path<String>,
) -> Result<Json<CollectionReport>, ApiError> {
    Ok(Json(monitor.collection_report(&collection)?))
}

pub(super) async fn export(
    State(monitor): State<Arc<Monitor>>,
) -> Result<impl IntoResponse, ApiError> {
    let tables = monitor.export_tables();
    let archive = package_archive(&tables, constants::export::FILE_STEM)?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                constants::export::ARCHIVE_NAME
            ),
        ),
    ];
    Ok((headers, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::source::MockSource;
    use crate::types::CollectionName;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};

    async fn polled_monitor() -> Arc<Monitor> {
        let source = MockSource::new();
        let monitor = Arc::new(Monitor::with_source(
            source.clone(),
            &MonitorConfig::default(),
        ));
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        monitor.poll_at(start).await.unwrap();
        source.set_count(CollectionName::Files, 10);
        source.push_update("t1", "scanning");
        monitor
            .poll_at(start + chrono::Duration::seconds(5))
            .await
            .unwrap();
        monitor
    }

    #[tokio::test]
    async fn test_updates_default_limit() {
        let monitor = polled_monitor().await;
        let Json(updates) = updates(State(monitor), Query(UpdatesQuery::default())).await;
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].message, "scanning");
    }

    #[tokio::test]
    async fn test_stats_view_shape() {
        let monitor = polled_monitor().await;
        let Json(view) = stats(State(monitor)).await;
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["counts"]["files"], 10);
        assert_eq!(value["rates"]["collections"]["files"][0]["rate"], 2.0);
        assert_eq!(value["updates"].as_array().unwrap().len(), 1);
        assert!(value["trends"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_collection_is_rejected() {
        let monitor = polled_monitor().await;
        let err = collection_report(State(monitor), Path("users".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_response_headers() {
        let monitor = polled_monitor().await;
        let response = export(State(monitor)).await.unwrap().into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/zip"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"monitor_stats.zip\""
        );
    }
}
