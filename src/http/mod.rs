//! HTTP facade over a shared [`Monitor`]
//!
//! Read-only JSON endpoints plus the zip export. Handlers never touch the
//! document store; they only read what the poll loop has recorded.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::UpdatesQuery;

use crate::monitor::Monitor;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the facade router
pub fn router(monitor: Arc<Monitor>) -> Router {
    Router::new()
        .route("/", get(handlers::banner))
        .route("/api/stats", get(handlers::stats))
        .route("/api/updates", get(handlers::updates))
        .route("/api/report", get(handlers::report))
        .route("/api/report/:collection", get(handlers::collection_report))
        .route("/api/export", get(handlers::export))
        .with_state(monitor)
}

/// Serve the facade on `listen_addr` until `shutdown` resolves
pub async fn serve<F>(monitor: Arc<Monitor>, listen_addr: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", listen_addr))?;
    info!("Serving monitor API on http://{}", listener.local_addr()?);

    axum::serve(listener, router(monitor))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}
