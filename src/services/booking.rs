//! Booking service — creation, listings, and admin status updates.
//!
//! DESIGN
//! ======
//! A booking is one record plus two index memberships: the owner's
//! `booking:user:{id}` list and the global `booking:list`. Ids are minted
//! from the creation timestamp. There is no idempotency key, so a client
//! that submits twice gets two bookings.
//!
//! The submitted price and duration are stored verbatim. Nothing here
//! cross-checks them against the court's hourly rate; the original system
//! trusted the client on this and the wire contract preserves that, so a
//! hostile client can book at an arbitrary price. Tracked as a known gap.

use serde::Deserialize;

use crate::models::{Booking, BookingStatus, UserRecord, UserSnapshot, now_rfc3339, next_id_millis};
use crate::store::{self, KvStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("booking not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Client-supplied booking fields. `court_id` is expected to reference a
/// catalog entry at creation time; it is not re-validated afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub court_id: String,
    pub court_name: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub price: f64,
}

/// Create a booking for the authenticated caller.
///
/// Stores the record, then appends its id to the caller's index and the
/// global index. The two appends are independent read-modify-write cycles
/// with no locking: concurrent creations can drop an id from an index.
pub async fn create(
    store: &dyn KvStore,
    caller: &UserRecord,
    input: NewBooking,
) -> Result<Booking, StoreError> {
    let id = format!("b{}", next_id_millis());
    let booking = Booking {
        id: id.clone(),
        court_id: input.court_id,
        court_name: input.court_name,
        user: UserSnapshot::of(caller),
        date: input.date,
        time: input.time,
        duration: input.duration,
        price: input.price,
        status: BookingStatus::Confirmed,
        created_at: now_rfc3339(),
    };

    store::put_record(store, &store::booking_key(&id), &booking).await?;
    store::append_to_index(store, &store::user_bookings_key(&caller.id), &id).await?;
    store::append_to_index(store, store::BOOKING_INDEX, &id).await?;

    Ok(booking)
}

/// List the caller's own bookings, newest booking date first.
pub async fn list_for_user(store: &dyn KvStore, user_id: &str) -> Result<Vec<Booking>, StoreError> {
    let mut bookings: Vec<Booking> =
        store::resolve_index(store, &store::user_bookings_key(user_id), store::booking_key).await?;
    sort_by_date_desc(&mut bookings);
    Ok(bookings)
}

/// List every booking in the system, newest booking date first. Admin-only
/// at the route layer.
pub async fn list_all(store: &dyn KvStore) -> Result<Vec<Booking>, StoreError> {
    let mut bookings: Vec<Booking> =
        store::resolve_index(store, store::BOOKING_INDEX, store::booking_key).await?;
    sort_by_date_desc(&mut bookings);
    Ok(bookings)
}

/// Overwrite a booking's status in place. Idempotent; keeps no record of
/// who changed it or when.
pub async fn update_status(
    store: &dyn KvStore,
    id: &str,
    status: BookingStatus,
) -> Result<Booking, BookingError> {
    let key = store::booking_key(id);
    let mut booking: Booking = store::get_record(store, &key)
        .await?
        .ok_or_else(|| BookingError::NotFound(id.to_owned()))?;

    booking.status = status;
    store::put_record(store, &key, &booking).await?;
    Ok(booking)
}

/// ISO dates (`YYYY-MM-DD`) compare correctly as strings, so plain string
/// ordering gives newest-first.
fn sort_by_date_desc(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
#[path = "booking_test.rs"]
mod tests;
