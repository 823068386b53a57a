//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the two shared resources: the key-value store and the external auth
//! provider client. There is no other cross-request mutable state — every
//! request is an independent sequence of store calls.

use std::sync::Arc;

use crate::error::ApiError;
use crate::services::auth::AuthProvider;
use crate::store::KvStore;

/// Shared application state. Clone is required by Axum — both fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    /// `None` when provider credentials are not configured; auth endpoints
    /// then fail with a logged internal error instead of at startup.
    pub auth: Option<Arc<dyn AuthProvider>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, auth: Option<Arc<dyn AuthProvider>>) -> Self {
        Self { store, auth }
    }

    /// The auth provider, or an internal error when not configured.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if provider credentials were missing at
    /// startup.
    pub fn provider(&self) -> Result<&dyn AuthProvider, ApiError> {
        self.auth
            .as_deref()
            .ok_or_else(|| ApiError::Internal("auth provider not configured".to_owned()))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
