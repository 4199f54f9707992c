//! The External Dynamic List endpoint.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::error::ApiError;
use crate::feed;
use crate::AppState;

/// `GET /edl/{category}` → `200 text/plain`, one token per line.
///
/// No-cache headers force firewalls to fetch the live set on every
/// poll; a stale serving window would keep blocking (or unblocking)
/// the wrong addresses.
pub async fn serve_edl(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Response {
    match feed::render(&state.store, &category, Utc::now()) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (
                    header::CACHE_CONTROL,
                    "no-cache, no-store, must-revalidate",
                ),
                (header::PRAGMA, "no-cache"),
            ],
            body,
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
