//! Core domain types shared across the crate.
//!
//! DESIGN
//! ======
//! Everything here is plain data. A `Rental`'s status is never stored
//! independently — it is derived from the handoff machine's current view
//! state, so the two can never disagree.

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

use std::fmt::Write;

use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::handoff::ViewState;

/// Tool condition as declared on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCondition {
    New,
    LikeNew,
    #[default]
    Good,
    Fair,
    Worn,
}

/// A published tool listing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolListing {
    /// Unique listing identifier.
    pub id: Uuid,
    /// Owner's user id.
    pub owner_id: Uuid,
    /// Display title (e.g. "DeWalt 20V Max Cordless Drill").
    pub title: String,
    /// Rental rate in dollars per day.
    pub rate_per_day: f64,
    /// Security deposit held for the rental period.
    pub deposit: f64,
    /// Outright purchase price, when the owner allows buyout.
    pub purchase_price: Option<f64>,
    /// Listing latitude.
    pub lat: f64,
    /// Listing longitude.
    pub lng: f64,
    /// Percentage-based position used by the offline map fallback.
    pub fallback_position: FallbackPosition,
}

/// Position of a marker in the offline-mock map layout, as percentages of the
/// viewport. Carried on the listing so the fallback stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FallbackPosition {
    pub top_pct: f64,
    pub left_pct: f64,
}

/// A rental between two users. Status is derived, never persisted.
#[derive(Debug, Clone)]
pub struct Rental {
    pub tool_id: Uuid,
    pub owner_id: Uuid,
    pub renter_id: Uuid,
    pub rate_per_day: f64,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub deposit_amount: f64,
}

/// Coarse rental status derived from the handoff view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    /// Handoff not yet complete; tool still with the owner.
    PendingPickup,
    /// Tool is with the renter and the clock is running.
    Active,
    /// A return flow has begun; forward-only to a terminal state.
    Returning,
    /// Rental finished and deposit released.
    Completed,
    /// Renter bought the tool outright; no return.
    Purchased,
}

impl RentalStatus {
    /// Derive the status from the current handoff view state.
    #[must_use]
    pub fn from_view(view: ViewState) -> Self {
        match view {
            ViewState::PickupInfo
            | ViewState::ScanOwnerQr
            | ViewState::ConditionStart
            | ViewState::OwnerPickupInfo
            | ViewState::OwnerInspect
            | ViewState::OwnerVerifyId
            | ViewState::OwnerScanRenter => Self::PendingPickup,
            ViewState::Active => Self::Active,
            ViewState::ConditionEnd
            | ViewState::ShowRenterQr
            | ViewState::OwnerReturnInspect
            | ViewState::OwnerScanReturn
            | ViewState::OwnerRate => Self::Returning,
            ViewState::Completed | ViewState::OwnerCompleted => Self::Completed,
            ViewState::Purchased => Self::Purchased,
        }
    }
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 16-byte hex handoff code.
///
/// Shown as a QR payload by one party and scanned by the other; a fresh code
/// is generated per handshake so codes are single-use.
#[must_use]
pub fn generate_handoff_code() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Format a dollar amount for display, rounding to two decimals.
///
/// All pricing math stays unrounded; this is the single display-time
/// rounding point.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}
