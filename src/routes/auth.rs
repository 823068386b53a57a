//! Auth routes — signup, login, current user, logout — and the bearer-token
//! extractors the rest of the API authenticates with.

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::models::UserRecord;
use crate::services::auth as auth_svc;
use crate::state::AppState;
use crate::store;

const MIN_PASSWORD_LEN: usize = 6;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub(crate) fn bearer_token(header: Option<&str>) -> Option<&str> {
    let raw = header?;
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Authenticated caller, re-validated against the auth provider on every
/// request. Use as a handler parameter to require authentication.
pub struct Caller(pub UserRecord);

impl<S> axum::extract::FromRequestParts<S> for Caller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let token = bearer_token(header);
        let caller =
            auth_svc::resolve_caller(app_state.provider()?, app_state.store.as_ref(), token).await?;
        Ok(Self(caller))
    }
}

/// Authenticated caller whose cached role is admin. Rejects with 403 for
/// everyone else.
pub struct AdminCaller(pub UserRecord);

impl<S> axum::extract::FromRequestParts<S> for AdminCaller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Caller(caller) = Caller::from_request_parts(parts, state).await?;
        auth_svc::ensure_admin(&caller)?;
        Ok(Self(caller))
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupBody {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

/// Field checks the provider should never see. Returns `(name, email,
/// password)` on success.
pub(crate) fn validate_signup(body: SignupBody) -> Result<(String, String, String), ApiError> {
    let (Some(name), Some(email), Some(password)) = (body.name, body.email, body.password) else {
        return Err(ApiError::Validation("Missing required fields".to_owned()));
    };
    if name.is_empty() || email.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_owned()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_owned(),
        ));
    }
    Ok((name, email, password))
}

/// `POST /auth/signup` — register with the provider and cache the user
/// record. New users always get the `user` role.
pub async fn signup(State(state): State<AppState>, Json(body): Json<SignupBody>) -> ApiResult<Json<serde_json::Value>> {
    let (name, email, password) = validate_signup(body)?;

    let identity = state.provider()?.create_user(&name, &email, &password).await?;
    let record = auth_svc::synthesize_record(&identity);
    store::put_record(state.store.as_ref(), &store::user_key(&record.id), &record).await?;

    Ok(Json(json!({ "user": record })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
    email: Option<String>,
    password: Option<String>,
}

/// `POST /auth/login` — verify credentials with the provider and return a
/// bearer token. Backfills the cached user record if it went missing.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> ApiResult<Json<serde_json::Value>> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(ApiError::Validation("Email and password required".to_owned()));
    };
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Email and password required".to_owned()));
    }

    let signed_in = state.provider()?.sign_in(&email, &password).await?;

    let user_key = store::user_key(&signed_in.identity.id);
    let record = match store::get_record::<UserRecord>(state.store.as_ref(), &user_key).await? {
        Some(record) => record,
        None => {
            let record = auth_svc::synthesize_record(&signed_in.identity);
            store::put_record(state.store.as_ref(), &user_key, &record).await?;
            record
        }
    };

    Ok(Json(json!({
        "access_token": signed_in.access_token,
        "user": record,
    })))
}

/// `GET /auth/user` — return the caller's user record.
pub async fn current_user(Caller(caller): Caller) -> Json<serde_json::Value> {
    Json(json!({ "user": caller }))
}

/// `POST /auth/logout` — server-side no-op; tokens are stateless here and
/// the client just drops its copy.
pub async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "success": true }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
