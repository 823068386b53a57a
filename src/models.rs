//! Domain records stored in the key-value store.
//!
//! DESIGN
//! ======
//! Every record serializes to the exact JSON shape the web client consumes,
//! so serde attribute names here *are* the wire format. Booking and Message
//! use camelCase field names; Court and Offer are single-word lowercase
//! except for `type`, `validUntil` and `minBooking`.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// =============================================================================
// ENUMS
// =============================================================================

/// Sport discipline a court is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtType {
    Football,
    Basketball,
    Tennis,
}

/// Booking lifecycle state. New bookings start out `Confirmed`; there is no
/// approval step that would ever leave one in `Pending` today, but the state
/// exists in stored data and the admin UI can set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Contact-form message state, toggled by admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Read,
}

/// Closed role set. All admin checks go through [`Role::is_admin`]; handlers
/// never compare raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// A bookable court. Reference data: seeded once at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub court_type: CourtType,
    pub image: String,
    pub location: String,
    /// Hourly rate.
    pub price: u32,
    pub rating: f64,
    pub reviews: u32,
    pub features: Vec<String>,
    /// Opening windows as `HH:MM-HH:MM` ranges.
    pub availability: Vec<String>,
    pub description: String,
    pub popular: bool,
}

/// A promotional offer. Reference data, seeded alongside courts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Percent off.
    pub discount: u32,
    pub code: String,
    pub valid_until: String,
    pub image: String,
    /// Minimum booked hours for the offer to apply, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_booking: Option<u32>,
}

// =============================================================================
// USERS
// =============================================================================

/// Cached copy of an auth-provider user, keyed `user:{id}` in the store.
/// The provider owns identity and passwords; this record only exists so role
/// checks do not round-trip to the provider on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Point-in-time copy of user fields embedded in a booking. Deliberately a
/// snapshot, not a reference: it does not update if the user later renames
/// or changes email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
}

impl UserSnapshot {
    #[must_use]
    pub fn of(user: &UserRecord) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
        }
    }
}

// =============================================================================
// BOOKINGS & MESSAGES
// =============================================================================

/// A court reservation. Append-only: records are created by users, status is
/// flipped by admins, nothing is ever deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub court_id: String,
    pub court_name: String,
    #[serde(flatten)]
    pub user: UserSnapshot,
    /// Booking day, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    /// Booked hours.
    pub duration: u32,
    /// Total price as submitted by the client. Not recomputed against the
    /// court's hourly rate server-side.
    pub price: f64,
    pub status: BookingStatus,
    pub created_at: String,
}

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
    /// Submission timestamp, RFC 3339.
    pub date: String,
    pub status: MessageStatus,
}

// =============================================================================
// CLOCK HELPERS
// =============================================================================

/// Current time as an RFC 3339 string, used for `createdAt`/`date` fields.
#[must_use]
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_unix_millis() -> i64 {
    i64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(0)
}

static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp for minting record ids, forced strictly increasing
/// within this process so two submissions in the same millisecond still get
/// distinct ids (and therefore distinct records).
#[must_use]
pub fn next_id_millis() -> i64 {
    let now = now_unix_millis();
    let mut last = LAST_ID_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_ID_MILLIS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
