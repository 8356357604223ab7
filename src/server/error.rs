use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flow_analytics::AnalyticsError;
use futuboard_core_types::IdParseError;
use futuboard_event_store::{EsError, EsErrorKind};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidId(#[from] IdParseError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    #[error(transparent)]
    Store(#[from] EsError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Analytics(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Analytics(AnalyticsError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Analytics(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(err) => match err.kind() {
                EsErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(err = %self, "analytics request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
