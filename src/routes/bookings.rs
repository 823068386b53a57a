//! Booking endpoints — user creation/listing plus admin listing and status
//! updates.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use super::auth::{AdminCaller, Caller};
use crate::error::{ApiError, ApiResult};
use crate::models::BookingStatus;
use crate::services::booking::{self, NewBooking};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBookingBody {
    court_id: Option<String>,
    court_name: Option<String>,
    date: Option<String>,
    time: Option<String>,
    duration: Option<u32>,
    price: Option<f64>,
}

/// All fields required; zero duration or price is rejected the same as a
/// missing field.
pub(crate) fn validate_booking(body: CreateBookingBody) -> Result<NewBooking, ApiError> {
    let missing = || ApiError::Validation("Missing required fields".to_owned());

    let court_id = body.court_id.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let court_name = body.court_name.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let date = body.date.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let time = body.time.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let duration = body.duration.filter(|v| *v > 0).ok_or_else(missing)?;
    let price = body.price.filter(|v| *v > 0.0).ok_or_else(missing)?;

    Ok(NewBooking { court_id, court_name, date, time, duration, price })
}

/// `POST /bookings` — create a booking for the caller.
pub async fn create(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<CreateBookingBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let input = validate_booking(body)?;
    let booking = booking::create(state.store.as_ref(), &caller, input).await?;
    Ok(Json(json!({ "booking": booking })))
}

/// `GET /bookings` — the caller's own bookings, newest date first.
pub async fn list_own(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> ApiResult<Json<serde_json::Value>> {
    let bookings = booking::list_for_user(state.store.as_ref(), &caller.id).await?;
    Ok(Json(json!({ "bookings": bookings })))
}

/// `GET /admin/bookings` — every booking in the system.
pub async fn list_all(
    State(state): State<AppState>,
    AdminCaller(_): AdminCaller,
) -> ApiResult<Json<serde_json::Value>> {
    let bookings = booking::list_all(state.store.as_ref()).await?;
    Ok(Json(json!({ "bookings": bookings })))
}

/// Parse a `{"status": ...}` body against a closed status enum; anything
/// else is a validation error, not a silent passthrough.
pub(crate) fn parse_status<T: serde::de::DeserializeOwned>(body: &serde_json::Value) -> Result<T, ApiError> {
    body.get("status")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| ApiError::Validation("Invalid status".to_owned()))
}

/// `PUT /bookings/:id` — admin-only status overwrite.
pub async fn update_status(
    State(state): State<AppState>,
    AdminCaller(_): AdminCaller,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<serde_json::Value>> {
    let status: BookingStatus = parse_status(&body)?;
    let booking = booking::update_status(state.store.as_ref(), &id, status).await?;
    Ok(Json(json!({ "booking": booking })))
}

#[cfg(test)]
#[path = "bookings_test.rs"]
mod tests;
