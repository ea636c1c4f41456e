//! Mapping of library errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use widgetboard_lib::{ExtractError, WidgetError};

/// An error response with a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }
}

impl From<WidgetError> for ApiError {
    fn from(e: WidgetError) -> Self {
        let status = match &e {
            WidgetError::Fetch(_) => StatusCode::SERVICE_UNAVAILABLE,
            WidgetError::Extract(ExtractError::NotFound(_)) => StatusCode::NOT_FOUND,
            WidgetError::Extract(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WidgetError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WidgetError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{} {}", self.status, self.detail);
        } else {
            tracing::debug!("{} {}", self.status, self.detail);
        }
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
