//! API error taxonomy and HTTP mapping.
//!
//! Every handler returns `Result<_, ApiError>`; service-level errors are
//! converted here so the mapping to a status code lives in one place.
//! Internal causes are logged and replaced with a generic message — the
//! original cause never reaches the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::services::auth::AuthError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden - Admin access required")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(cause) => {
                tracing::error!(error = %cause, "request failed");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => Self::Unauthorized,
            AuthError::Rejected(message) => Self::Validation(message),
            AuthError::Provider(cause) => Self::Internal(cause),
        }
    }
}

impl From<crate::services::booking::BookingError> for ApiError {
    fn from(err: crate::services::booking::BookingError) -> Self {
        match err {
            crate::services::booking::BookingError::NotFound(_) => Self::NotFound("Booking"),
            crate::services::booking::BookingError::Store(cause) => cause.into(),
        }
    }
}

impl From<crate::services::message::MessageError> for ApiError {
    fn from(err: crate::services::message::MessageError) -> Self {
        match err {
            crate::services::message::MessageError::NotFound(_) => Self::NotFound("Message"),
            crate::services::message::MessageError::Store(cause) => cause.into(),
        }
    }
}

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
