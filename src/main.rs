mod db;
mod error;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use crate::services::auth::{AuthConfig, GoTrueProvider};
use crate::services::catalog;
use crate::store::{KvStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Postgres-backed store when configured; in-memory otherwise so a local
    // checkout runs without credentials (data does not survive restarts).
    let store: Arc<dyn KvStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = db::init_pool(&database_url)
                .await
                .expect("database init failed");
            Arc::new(PgStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set — using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // Explicit one-shot catalog seed, guarded by an index presence check.
    match catalog::seed_if_empty(store.as_ref()).await {
        Ok(0) => tracing::info!("catalog already seeded"),
        Ok(count) => tracing::info!(courts = count, "catalog seeded"),
        Err(e) => panic!("catalog seed failed: {e}"),
    }

    let auth = match AuthConfig::from_env() {
        Some(config) => Some(Arc::new(GoTrueProvider::new(config)) as Arc<dyn services::auth::AuthProvider>),
        None => {
            tracing::warn!("auth provider env vars not set — authenticated endpoints will fail");
            None
        }
    };

    let state = state::AppState::new(store, auth);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "courtbook listening");
    axum::serve(listener, app).await.expect("server failed");
}
