//! Indicator admin endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use palisade_core::expiry::IndicatorState;
use palisade_core::types::{CategoryId, Indicator, IndicatorId};
use palisade_store::{NewIndicator, StoreError};

use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateIndicator {
    pub token: String,
    /// Target category slug.
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /api/indicators`: manual submission.
pub async fn create_indicator(
    State(state): State<AppState>,
    Json(input): Json<CreateIndicator>,
) -> Result<(StatusCode, Json<Indicator>), ApiError> {
    let category = state
        .store
        .category_by_name(&input.category)
        .ok_or_else(|| ApiError(StoreError::UnknownCategory(input.category.clone())))?;

    let indicator = state.store.insert(NewIndicator::manual(
        input.token,
        category.id,
        input.description,
    ))?;
    Ok((StatusCode::CREATED, Json(indicator)))
}

/// `DELETE /api/indicators/{id}`: idempotent delete.
pub async fn delete_indicator(
    State(state): State<AppState>,
    Path(id): Path<IndicatorId>,
) -> StatusCode {
    if state.store.delete(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// One indicator as listed to operators, with its computed countdown.
/// The TTL is derived per request; nothing is persisted.
#[derive(Serialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub state: IndicatorState,
    /// Seconds left before expiry; absent when unbounded or expired.
    pub expires_in_secs: Option<i64>,
}

/// `GET /api/categories/{id}/indicators`: newest first, with TTLs.
pub async fn list_category_indicators(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Vec<IndicatorRow>>, ApiError> {
    if state.store.category(id).is_none() {
        return Err(ApiError(StoreError::unknown_category(id)));
    }

    let now = Utc::now();
    let rows = state
        .store
        .list_by_category(id)
        .into_iter()
        .map(|indicator| {
            let ttl = state.store.ttl(&indicator, now);
            IndicatorRow {
                state: ttl.into(),
                expires_in_secs: ttl.seconds_remaining(),
                indicator,
            }
        })
        .collect();
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct ReassignRequest {
    pub ids: Vec<IndicatorId>,
    pub target_category_id: CategoryId,
}

#[derive(Serialize)]
pub struct ReassignResponse {
    pub moved: usize,
}

/// `POST /api/indicators/reassign`: atomic bulk move ("extract to
/// category"). All-or-nothing.
pub async fn reassign_indicators(
    State(state): State<AppState>,
    Json(input): Json<ReassignRequest>,
) -> Result<Json<ReassignResponse>, ApiError> {
    let moved = state
        .store
        .reassign(&input.ids, input.target_category_id)?;
    Ok(Json(ReassignResponse { moved }))
}
