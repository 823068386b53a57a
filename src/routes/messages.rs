//! Contact-message endpoints — anonymous submission plus admin listing and
//! read-status updates.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use super::auth::AdminCaller;
use super::bookings::parse_status;
use crate::error::{ApiError, ApiResult};
use crate::models::MessageStatus;
use crate::services::message::{self, NewMessage};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMessageBody {
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

pub(crate) fn validate_message(body: CreateMessageBody) -> Result<NewMessage, ApiError> {
    let missing = || ApiError::Validation("Missing required fields".to_owned());

    let name = body.name.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let email = body.email.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let subject = body.subject.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let message = body.message.filter(|v| !v.is_empty()).ok_or_else(missing)?;

    Ok(NewMessage { name, email, subject, body: message })
}

/// `POST /messages` — anonymous contact-form submission.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateMessageBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let input = validate_message(body)?;
    let created = message::create(state.store.as_ref(), input).await?;
    Ok(Json(json!({ "message": created })))
}

/// `GET /admin/messages` — every message, newest first.
pub async fn list_all(
    State(state): State<AppState>,
    AdminCaller(_): AdminCaller,
) -> ApiResult<Json<serde_json::Value>> {
    let messages = message::list_all(state.store.as_ref()).await?;
    Ok(Json(json!({ "messages": messages })))
}

/// `PUT /messages/:id` — admin-only read-status overwrite.
pub async fn update_status(
    State(state): State<AppState>,
    AdminCaller(_): AdminCaller,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<serde_json::Value>> {
    let status: MessageStatus = parse_status(&body)?;
    let updated = message::update_status(state.store.as_ref(), &id, status).await?;
    Ok(Json(json!({ "message": updated })))
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
