//! Whitelist admin endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use palisade_core::types::WhitelistEntry;

use crate::error::ApiError;
use crate::AppState;

/// `GET /api/whitelist`: entries ordered by token.
pub async fn list_whitelist(State(state): State<AppState>) -> Json<Vec<WhitelistEntry>> {
    Json(state.store.list_whitelist())
}

#[derive(Deserialize)]
pub struct CreateWhitelistEntry {
    pub token: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /api/whitelist`
pub async fn create_whitelist_entry(
    State(state): State<AppState>,
    Json(input): Json<CreateWhitelistEntry>,
) -> Result<(StatusCode, Json<WhitelistEntry>), ApiError> {
    let entry = state
        .store
        .add_whitelist_entry(&input.token, input.description)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `DELETE /api/whitelist/{token}`: the token is a wildcard path
/// segment so CIDR entries containing `/` resolve.
pub async fn delete_whitelist_entry(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> StatusCode {
    if state.store.remove_whitelist_entry(&token) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
