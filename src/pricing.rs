//! Booking price calculator — one pure function shared by every call site.
//!
//! DESIGN
//! ======
//! The original prototype duplicated this arithmetic inline in the booking
//! and details screens; here it lives once. `quote` is deterministic, has no
//! side effects, and never rounds — display formatting is the only rounding
//! point (`model::format_usd`).

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;

use time::OffsetDateTime;

/// Delivery surcharge for rental handover by delivery.
pub const DELIVERY_FEE: f64 = 15.00;
/// Flat travel fee applied to every service booking.
pub const TRAVEL_FEE: f64 = 10.00;
/// Optional damage-protection fee for rentals.
pub const INSURANCE_FEE: f64 = 3.00;
/// Platform service fee rate applied to the subtotal.
pub const SERVICE_FEE_RATE: f64 = 0.10;

const SECONDS_PER_DAY: i64 = 86_400;

/// What is being booked: the tool alone, or the tool with its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingKind {
    /// Tool rental billed per day.
    #[default]
    Rental,
    /// Operator service billed per hour.
    Service,
}

/// How the tool changes hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandoverMethod {
    /// Renter collects from the owner's location.
    #[default]
    Pickup,
    /// Both parties meet at an agreed location.
    Meetup,
    /// Owner delivers to the renter's address (surcharge applies).
    Delivery,
}

/// Inputs to the price calculator. No identity — a pure configuration value.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub kind: BookingKind,
    /// Dollars per day (rental) or per hour (service).
    pub rate: f64,
    pub handover: HandoverMethod,
    /// Damage protection opt-in. Ignored for service bookings.
    pub insurance: bool,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    /// Estimated labor hours. Ignored for rentals.
    pub service_hours: u32,
}

/// One itemized fee line in a breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeLine {
    pub label: &'static str,
    pub amount: f64,
}

/// Derived price breakdown. All amounts unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    /// Base charge: days × rate or hours × rate.
    pub base: f64,
    /// Itemized surcharges (delivery, protection, travel).
    pub fees: Vec<FeeLine>,
    /// Platform fee: [`SERVICE_FEE_RATE`] of the subtotal.
    pub service_fee: f64,
    /// Base plus fees, before the platform fee.
    pub subtotal: f64,
    /// Subtotal plus platform fee.
    pub total: f64,
}

/// Billable rental days between two instants: ceiling of the span in days,
/// floored at 1. An end at or before the start still bills one day.
#[must_use]
pub fn rental_days(start: OffsetDateTime, end: OffsetDateTime) -> i64 {
    let span = (end - start).whole_seconds().max(0);
    ((span + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
}

/// Compute the full price breakdown for a booking configuration.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quote(config: &BookingConfig) -> PriceBreakdown {
    let mut fees = Vec::new();

    let base = match config.kind {
        BookingKind::Rental => {
            if config.handover == HandoverMethod::Delivery {
                fees.push(FeeLine { label: "Delivery Fee", amount: DELIVERY_FEE });
            }
            if config.insurance {
                fees.push(FeeLine { label: "Damage Protection", amount: INSURANCE_FEE });
            }
            rental_days(config.start, config.end) as f64 * config.rate
        }
        BookingKind::Service => {
            fees.push(FeeLine { label: "Travel Fee", amount: TRAVEL_FEE });
            f64::from(config.service_hours) * config.rate
        }
    };

    let subtotal = base + fees.iter().map(|f| f.amount).sum::<f64>();
    let service_fee = subtotal * SERVICE_FEE_RATE;

    PriceBreakdown { base, fees, service_fee, subtotal, total: subtotal + service_fee }
}

/// Cost of extending an active rental by whole days.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn extension_cost(days: u32, rate_per_day: f64) -> f64 {
    f64::from(days) * rate_per_day
}

/// Buyout quote: purchase price less accumulated rent-to-own credit,
/// floored at zero.
#[must_use]
pub fn buyout_quote(purchase_price: f64, rental_credit: f64) -> f64 {
    (purchase_price - rental_credit).max(0.0)
}

/// Owner payout breakdown after the platform commission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnerEarnings {
    pub gross: f64,
    pub commission: f64,
    pub net: f64,
}

/// Split a gross rental payment into platform commission and owner net.
#[must_use]
pub fn owner_earnings(gross: f64) -> OwnerEarnings {
    let commission = gross * SERVICE_FEE_RATE;
    OwnerEarnings { gross, commission, net: gross - commission }
}
