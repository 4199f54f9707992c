//! Category admin endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use palisade_core::types::{Category, CategoryId};
use palisade_store::{CategoryPatch, CategorySpec};

use crate::error::ApiError;
use crate::AppState;

/// `GET /api/categories`
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.list_categories())
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<AppState>,
    Json(spec): Json<CategorySpec>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.store.create_category(spec)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PATCH /api/categories/{id}`
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    let category = state.store.update_category(id, patch)?;
    Ok(Json(category))
}

#[derive(Deserialize)]
pub struct DeleteParams {
    /// Category to migrate indicators into; without it the delete
    /// cascades onto the category's indicators.
    pub migrate_to: Option<CategoryId>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    /// Indicators migrated or removed with the category.
    pub affected: usize,
}

/// `DELETE /api/categories/{id}?migrate_to=<uuid>`
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let affected = state.store.delete_category(id, params.migrate_to)?;
    Ok(Json(DeleteResponse { affected }))
}
