//! External auth provider integration and caller resolution.
//!
//! ARCHITECTURE
//! ============
//! Identity and password verification are fully delegated to a GoTrue-style
//! HTTP provider; this process keeps no session state and re-validates the
//! bearer token on every authenticated request. What *is* kept locally is a
//! denormalized `UserRecord` per user in the key-value store, so role checks
//! do not round-trip to the provider.

use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{Role, UserRecord};
use crate::store::{self, KvStore};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    /// Provider refused the request (e.g. duplicate email on signup).
    #[error("{0}")]
    Rejected(String),
    #[error("auth provider error: {0}")]
    Provider(String),
}

/// Identity as reported by the provider. `name` comes from signup metadata
/// and may be absent for users created out-of-band.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthIdentity {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Successful password sign-in: a bearer token plus the identity it belongs to.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub access_token: String,
    pub identity: AuthIdentity,
}

/// The slice of the auth provider this application uses.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new user with a confirmed email. Role metadata is always
    /// `"user"`; there is no path to self-assign admin.
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<AuthIdentity, AuthError>;

    /// Verify credentials and mint an access token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, AuthError>;

    /// Resolve a bearer token to the identity it was issued for.
    async fn resolve_token(&self, access_token: &str) -> Result<AuthIdentity, AuthError>;
}

// =============================================================================
// GOTRUE CLIENT
// =============================================================================

/// Auth provider configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: String,
    pub anon_key: String,
    pub service_role_key: String,
}

impl AuthConfig {
    /// Load from `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_SERVICE_ROLE_KEY`.
    /// Returns `None` if any are missing (auth endpoints will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SUPABASE_URL").ok()?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY").ok()?;
        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok()?;
        Some(Self { base_url, anon_key, service_role_key })
    }
}

/// GoTrue-over-HTTP implementation of [`AuthProvider`].
pub struct GoTrueProvider {
    config: AuthConfig,
    client: reqwest::Client,
}

impl GoTrueProvider {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self { config, client: reqwest::Client::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl ProviderUser {
    fn into_identity(self) -> AuthIdentity {
        let name = self
            .user_metadata
            .get("name")
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned);
        AuthIdentity { id: self.id, email: self.email, name }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

/// Extract the provider's error message from a response body, if any.
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|k| value.get(k).and_then(|v| v.as_str()))
        .map(ToOwned::to_owned)
}

#[async_trait::async_trait]
impl AuthProvider for GoTrueProvider {
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let resp = self
            .client
            .post(self.url("/admin/users"))
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                // No email server is configured; confirm at creation time.
                "email_confirm": true,
                "user_metadata": { "name": name, "role": "user" },
            }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| AuthError::Provider(e.to_string()))?;
        if status.is_client_error() {
            let message = provider_message(&body).unwrap_or_else(|| "Signup failed".to_owned());
            return Err(AuthError::Rejected(message));
        }
        if !status.is_success() {
            return Err(AuthError::Provider(format!("{status}: {body}")));
        }

        let user: ProviderUser =
            serde_json::from_str(&body).map_err(|_| AuthError::Provider(format!("unexpected response: {body}")))?;
        Ok(user.into_identity())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, AuthError> {
        let resp = self
            .client
            .post(self.url("/token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(AuthError::InvalidCredentials);
        }
        let body = resp.text().await.map_err(|e| AuthError::Provider(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Provider(format!("{status}: {body}")));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|_| AuthError::Provider(format!("unexpected response: {body}")))?;
        Ok(SignIn { access_token: token.access_token, identity: token.user.into_identity() })
    }

    async fn resolve_token(&self, access_token: &str) -> Result<AuthIdentity, AuthError> {
        let resp = self
            .client
            .get(self.url("/user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(AuthError::InvalidToken);
        }
        let body = resp.text().await.map_err(|e| AuthError::Provider(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Provider(format!("{status}: {body}")));
        }

        let user: ProviderUser =
            serde_json::from_str(&body).map_err(|_| AuthError::Provider(format!("unexpected response: {body}")))?;
        Ok(user.into_identity())
    }
}

// =============================================================================
// CALLER RESOLUTION
// =============================================================================

/// Display name fallback when no metadata name exists: the email local part.
#[must_use]
pub fn name_from_email(email: &str) -> String {
    let local = email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user");
    local.to_owned()
}

/// Build the cached user record for a provider identity that has none yet.
/// Role always starts as `User`; promotion to admin is an operational step
/// outside this API.
#[must_use]
pub fn synthesize_record(identity: &AuthIdentity) -> UserRecord {
    UserRecord {
        id: identity.id.clone(),
        name: identity
            .name
            .clone()
            .unwrap_or_else(|| name_from_email(&identity.email)),
        email: identity.email.clone(),
        role: Role::User,
    }
}

/// Resolve a bearer token to the caller's user record.
///
/// Re-validates against the provider on every call, then prefers the cached
/// `user:{id}` record (it carries the role). If the cache entry is missing
/// the record is synthesized from provider metadata without being persisted;
/// the login path is the one that writes it back.
///
/// # Errors
///
/// `Unauthorized` when the token is absent or rejected by the provider.
pub async fn resolve_caller(
    auth: &dyn AuthProvider,
    store: &dyn KvStore,
    bearer: Option<&str>,
) -> Result<UserRecord, ApiError> {
    let token = bearer.unwrap_or_default();
    if token.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    let identity = auth.resolve_token(token).await?;

    let cached = store::get_record::<UserRecord>(store, &store::user_key(&identity.id)).await?;
    Ok(cached.unwrap_or_else(|| synthesize_record(&identity)))
}

/// Single authorization predicate for admin-only operations.
///
/// # Errors
///
/// `Forbidden` when the caller's cached role is not admin.
pub fn ensure_admin(caller: &UserRecord) -> Result<(), ApiError> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
