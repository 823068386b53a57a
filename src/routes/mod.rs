//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! All endpoints live under a fixed server-identifier prefix, mirroring the
//! path the deployed web client is built against. CORS is wide open: the
//! client is served from a different origin and authenticates with bearer
//! tokens, not cookies.

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod messages;

use axum::Json;
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Path prefix every route is nested under.
pub const SERVER_PREFIX: &str = "/make-server-courtbook";

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/user", get(auth::current_user))
        .route("/auth/logout", post(auth::logout))
        .route("/courts", get(catalog::list_courts))
        .route("/courts/{id}", get(catalog::get_court))
        .route("/offers", get(catalog::list_offers))
        .route("/bookings", get(bookings::list_own).post(bookings::create))
        .route("/bookings/{id}", put(bookings::update_status))
        .route("/admin/bookings", get(bookings::list_all))
        .route("/messages", post(messages::create))
        .route("/messages/{id}", put(messages::update_status))
        .route("/admin/messages", get(messages::list_all))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Router::new().nest(SERVER_PREFIX, api)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
