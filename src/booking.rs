//! Booking draft flow: dates, handover method, address gate, submission.
//!
//! DESIGN
//! ======
//! `BookingDraft` is the mutable working copy behind the booking screen. Its
//! setters encode the picker rules (date pushes/clamps, address reset) so the
//! draft can never hold an inconsistent configuration. Submission is gated by
//! `can_submit`; an incomplete draft is rejected, never an error.

#[cfg(test)]
#[path = "booking_test.rs"]
mod tests;

use std::time::Duration as StdDuration;

use time::{Duration, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::pricing::{self, BookingConfig, BookingKind, HandoverMethod, PriceBreakdown};

/// Simulated payment-network latency on submit.
const SUBMIT_LATENCY: StdDuration = StdDuration::from_millis(1500);

/// Default service duration when switching to a service booking.
const DEFAULT_SERVICE_HOURS: u32 = 2;

/// Mock payment instrument attached to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    /// The in-app wallet balance.
    #[default]
    Wallet,
    /// A saved card.
    Card,
}

/// Why a draft cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingGap {
    /// The chosen handover method (or a service booking) needs an address.
    AddressRequired,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Payment went through; the booking is confirmed.
    Confirmed(Receipt),
    /// The draft was incomplete; nothing was charged.
    Rejected(BookingGap),
}

/// Confirmation issued for a successful booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub confirmation_id: Uuid,
    /// Total charged, unrounded.
    pub total: f64,
}

/// The working state of one booking-in-progress.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    kind: BookingKind,
    rate: f64,
    handover: HandoverMethod,
    address: Option<String>,
    insurance: bool,
    start: OffsetDateTime,
    end: OffsetDateTime,
    service_hours: u32,
    payment: PaymentMethod,
}

impl BookingDraft {
    /// Start a draft for the given booking kind at its date defaults.
    /// `now` anchors the defaults so the draft is testable.
    #[must_use]
    pub fn new(kind: BookingKind, rate: f64, now: OffsetDateTime) -> Self {
        let mut draft = Self {
            kind,
            rate,
            handover: HandoverMethod::default(),
            address: None,
            insurance: false,
            start: now,
            end: now,
            service_hours: DEFAULT_SERVICE_HOURS,
            payment: PaymentMethod::default(),
        };
        draft.reset_dates(now);
        draft
    }

    #[must_use]
    pub fn kind(&self) -> BookingKind {
        self.kind
    }

    #[must_use]
    pub fn handover(&self) -> HandoverMethod {
        self.handover
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub fn insurance(&self) -> bool {
        self.insurance
    }

    #[must_use]
    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    #[must_use]
    pub fn service_hours(&self) -> u32 {
        self.service_hours
    }

    #[must_use]
    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    /// Switch between renting the tool and booking its operator. Resets the
    /// date window and service duration to their defaults.
    pub fn set_kind(&mut self, kind: BookingKind, now: OffsetDateTime) {
        self.kind = kind;
        self.reset_dates(now);
        self.service_hours = DEFAULT_SERVICE_HOURS;
    }

    /// Change the handover method. Any previously entered address belongs to
    /// the old method, so it is cleared.
    pub fn set_handover(&mut self, handover: HandoverMethod) {
        if self.handover != handover {
            self.address = None;
        }
        self.handover = handover;
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        let address = address.into();
        self.address = if address.trim().is_empty() { None } else { Some(address) };
    }

    pub fn set_insurance(&mut self, insurance: bool) {
        self.insurance = insurance;
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.payment = payment;
    }

    pub fn set_service_hours(&mut self, hours: u32) {
        self.service_hours = hours.max(1);
    }

    /// Commit a start date from the picker. A start at or past the current
    /// end pushes the end out to a full day later.
    pub fn commit_start(&mut self, start: OffsetDateTime) {
        self.start = start;
        if self.end <= start {
            self.end = start + Duration::days(1);
        }
    }

    /// Commit an end date from the picker. An end at or before the current
    /// start is clamped to one hour after it.
    pub fn commit_end(&mut self, end: OffsetDateTime) {
        self.end = if end <= self.start { self.start + Duration::hours(1) } else { end };
    }

    /// Whether an address is required before this draft can be submitted.
    /// Pickup rentals are the only address-free configuration.
    #[must_use]
    pub fn needs_address(&self) -> bool {
        self.kind == BookingKind::Service || self.handover != HandoverMethod::Pickup
    }

    /// What still blocks submission, if anything.
    #[must_use]
    pub fn gap(&self) -> Option<BookingGap> {
        if self.needs_address() && self.address.is_none() {
            return Some(BookingGap::AddressRequired);
        }
        None
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.gap().is_none()
    }

    /// Price the draft as currently configured.
    #[must_use]
    pub fn quote(&self) -> PriceBreakdown {
        pricing::quote(&BookingConfig {
            kind: self.kind,
            rate: self.rate,
            handover: self.handover,
            insurance: self.insurance,
            start: self.start,
            end: self.end,
            service_hours: self.service_hours,
        })
    }

    /// Submit the draft. Simulates the payment round-trip; a complete draft
    /// always confirms.
    pub async fn submit(&self) -> SubmitOutcome {
        if let Some(gap) = self.gap() {
            return SubmitOutcome::Rejected(gap);
        }

        tokio::time::sleep(SUBMIT_LATENCY).await;

        let receipt = Receipt { confirmation_id: Uuid::new_v4(), total: self.quote().total };
        info!(
            kind = ?self.kind,
            total = receipt.total,
            confirmation = %receipt.confirmation_id,
            "booking confirmed"
        );
        SubmitOutcome::Confirmed(receipt)
    }

    fn reset_dates(&mut self, now: OffsetDateTime) {
        self.start = now + Duration::hours(1);
        self.end = self.start + Duration::days(1);
    }
}
