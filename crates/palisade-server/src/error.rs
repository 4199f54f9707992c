//! HTTP error mapping for the admin API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use palisade_store::StoreError;

/// API-facing error wrapper. Converts store errors into status codes:
/// validation → 400, not found → 404, conflicts → 409, transient → 503.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub StoreError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            StoreError::InvalidToken { .. } => StatusCode::BAD_REQUEST,
            StoreError::UnknownCategory(_) | StoreError::IndicatorNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            StoreError::AlreadyExists { .. }
            | StoreError::AlreadyWhitelisted { .. }
            | StoreError::TokenIsIndicator { .. }
            | StoreError::WhitelistEntryExists { .. }
            | StoreError::CategoryNameTaken { .. }
            | StoreError::DefaultCategoryProtected { .. } => StatusCode::CONFLICT,
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.to_string(),
            "retryable": self.0.is_retryable(),
        }));
        (status, body).into_response()
    }
}
