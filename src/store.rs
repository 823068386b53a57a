//! Key-value persistence primitive.
//!
//! DESIGN
//! ======
//! Every record in the system is one JSON value under a string key, plus a
//! denormalized id-list per collection for enumeration. The store itself is
//! deliberately dumb: `get`/`set`/`mget`, no transactions. Index appends are
//! read-modify-write, so two concurrent appends to the same list can lose an
//! id (last write wins). That gap is inherited from the source system and is
//! documented rather than designed around.
//!
//! Two backings: `PgStore` over a single jsonb table for deployments, and
//! `MemoryStore` for tests and credential-less local runs.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Black-box string-key → JSON-value store.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or overwrite the value under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Fetch many keys at once. The result is aligned with `keys`; a missing
    /// record yields `None` in its slot.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StoreError>;
}

// =============================================================================
// KEY SCHEME
// =============================================================================

pub const COURT_INDEX: &str = "court:list";
pub const OFFER_INDEX: &str = "offer:list";
pub const BOOKING_INDEX: &str = "booking:list";
pub const MESSAGE_INDEX: &str = "message:list";

#[must_use]
pub fn court_key(id: &str) -> String {
    format!("court:{id}")
}

#[must_use]
pub fn offer_key(id: &str) -> String {
    format!("offer:{id}")
}

#[must_use]
pub fn booking_key(id: &str) -> String {
    format!("booking:{id}")
}

/// Per-user booking index.
#[must_use]
pub fn user_bookings_key(user_id: &str) -> String {
    format!("booking:user:{user_id}")
}

#[must_use]
pub fn message_key(id: &str) -> String {
    format!("message:{id}")
}

#[must_use]
pub fn user_key(id: &str) -> String {
    format!("user:{id}")
}

// =============================================================================
// POSTGRES BACKING
// =============================================================================

/// `KvStore` over the `kv_store` table (`key text primary key, value jsonb`).
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl KvStore for PgStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO kv_store (key, value)
              VALUES ($1, $2)
              ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StoreError> {
        let rows = sqlx::query("SELECT key, value FROM kv_store WHERE key = ANY($1)")
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;
        let mut found: HashMap<String, Value> = HashMap::with_capacity(rows.len());
        for row in rows {
            found.insert(row.get("key"), row.get("value"));
        }
        Ok(keys.iter().map(|k| found.remove(k)).collect())
    }
}

// =============================================================================
// IN-MEMORY BACKING
// =============================================================================

/// `KvStore` backed by a process-local map. Used by the test suite and as a
/// fallback when `DATABASE_URL` is not configured.
#[derive(Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StoreError> {
        let entries = self.entries.read().await;
        Ok(keys.iter().map(|k| entries.get(k).cloned()).collect())
    }
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

/// Fetch and deserialize one record. A present-but-malformed value is
/// treated as missing rather than failing the request.
pub async fn get_record<T: serde::de::DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(value) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(record) => Ok(Some(record)),
        Err(err) => {
            tracing::warn!(%key, error = %err, "skipping malformed record");
            Ok(None)
        }
    }
}

/// Serialize and store one record.
pub async fn put_record<T: serde::Serialize>(
    store: &dyn KvStore,
    key: &str,
    record: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(record).unwrap_or(Value::Null);
    store.set(key, value).await
}

/// Read an id-index list; an absent index is an empty collection.
pub async fn get_index(store: &dyn KvStore, key: &str) -> Result<Vec<String>, StoreError> {
    let ids = get_record::<Vec<String>>(store, key).await?.unwrap_or_default();
    Ok(ids)
}

/// Append an id to an index list. Read-modify-write, not atomic.
pub async fn append_to_index(store: &dyn KvStore, key: &str, id: &str) -> Result<(), StoreError> {
    let mut ids = get_index(store, key).await?;
    ids.push(id.to_owned());
    put_record(store, key, &ids).await
}

/// Resolve an id-index to records via one `mget`, silently skipping ids with
/// no (or malformed) backing record.
pub async fn resolve_index<T: serde::de::DeserializeOwned>(
    store: &dyn KvStore,
    index_key: &str,
    record_key: impl Fn(&str) -> String,
) -> Result<Vec<T>, StoreError> {
    let ids = get_index(store, index_key).await?;
    let keys: Vec<String> = ids.iter().map(|id| record_key(id)).collect();
    let values = store.mget(&keys).await?;
    let records = values
        .into_iter()
        .flatten()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    Ok(records)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
