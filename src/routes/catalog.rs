//! Court and offer read endpoints. Public: no auth required.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::services::catalog;
use crate::state::AppState;

/// `GET /courts` — every court, in seed order.
pub async fn list_courts(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let courts = catalog::list_courts(state.store.as_ref()).await?;
    Ok(Json(json!({ "courts": courts })))
}

/// `GET /courts/:id`.
pub async fn get_court(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let court = catalog::get_court(state.store.as_ref(), &id)
        .await?
        .ok_or(ApiError::NotFound("Court"))?;
    Ok(Json(json!({ "court": court })))
}

/// `GET /offers` — every active promotion.
pub async fn list_offers(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let offers = catalog::list_offers(state.store.as_ref()).await?;
    Ok(Json(json!({ "offers": offers })))
}
