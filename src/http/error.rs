use crate::error::MonitorError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error("failed to build export archive: {0}")]
    Export(#[from] zip::result::ZipError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Monitor(MonitorError::InvalidCollection(_)) => StatusCode::BAD_REQUEST,
            Self::Monitor(MonitorError::SourceUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Monitor(MonitorError::InvalidCollection(_)) => {
                "Invalid collection type".to_string()
            }
            other => {
                error!("Request failed: {}", other);
                other.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_collection_is_bad_request() {
        let err = ApiError::from(MonitorError::InvalidCollection("x".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unavailable_source_is_503() {
        let err = ApiError::from(MonitorError::source_unavailable("down"));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
