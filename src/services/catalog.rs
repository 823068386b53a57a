//! Catalog service — court and offer reference data.
//!
//! DESIGN
//! ======
//! Courts and offers are immutable reference data. They are written exactly
//! once, by an explicit startup seed step guarded by an index presence
//! check, and afterwards served read-through: index list → per-id records.

use crate::models::{Court, Offer};
use crate::store::{self, KvStore, StoreError};

/// Seed payload embedded at compile time. Parsed fully on every seed attempt
/// so a malformed edit fails loudly at startup rather than surfacing as a
/// half-written catalog.
const SEED_JSON: &str = include_str!("../../data/seed.json");

#[derive(Debug, serde::Deserialize)]
struct SeedData {
    courts: Vec<Court>,
    offers: Vec<Offer>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("seed data malformed: {0}")]
    SeedData(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Populate courts and offers if the store is empty.
///
/// Idempotent: keyed on the presence of `court:list`, so a restart against
/// an already-seeded store is a no-op. Returns the number of courts written
/// (0 when already seeded).
///
/// # Errors
///
/// Fails if the embedded seed payload does not parse or the store rejects a
/// write.
pub async fn seed_if_empty(store: &dyn KvStore) -> Result<usize, CatalogError> {
    if store.get(store::COURT_INDEX).await?.is_some() {
        return Ok(0);
    }

    let seed: SeedData = serde_json::from_str(SEED_JSON)?;

    let court_ids: Vec<String> = seed.courts.iter().map(|c| c.id.clone()).collect();
    store::put_record(store, store::COURT_INDEX, &court_ids).await?;
    for court in &seed.courts {
        store::put_record(store, &store::court_key(&court.id), court).await?;
    }

    let offer_ids: Vec<String> = seed.offers.iter().map(|o| o.id.clone()).collect();
    store::put_record(store, store::OFFER_INDEX, &offer_ids).await?;
    for offer in &seed.offers {
        store::put_record(store, &store::offer_key(&offer.id), offer).await?;
    }

    Ok(seed.courts.len())
}

/// List all courts in index order.
pub async fn list_courts(store: &dyn KvStore) -> Result<Vec<Court>, StoreError> {
    store::resolve_index(store, store::COURT_INDEX, store::court_key).await
}

/// Fetch a single court by id.
pub async fn get_court(store: &dyn KvStore, id: &str) -> Result<Option<Court>, StoreError> {
    store::get_record(store, &store::court_key(id)).await
}

/// List all offers in index order.
pub async fn list_offers(store: &dyn KvStore) -> Result<Vec<Offer>, StoreError> {
    store::resolve_index(store, store::OFFER_INDEX, store::offer_key).await
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
