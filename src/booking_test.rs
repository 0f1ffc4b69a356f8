use super::*;
use time::macros::datetime;

const NOW: OffsetDateTime = datetime!(2026-08-10 09:00 UTC);

fn rental_draft() -> BookingDraft {
    BookingDraft::new(BookingKind::Rental, 30.0, NOW)
}

// =========================================================================
// date defaults and picker rules
// =========================================================================

#[test]
fn new_draft_starts_one_hour_out_for_one_day() {
    let draft = rental_draft();
    assert_eq!(draft.start(), NOW + Duration::hours(1));
    assert_eq!(draft.end(), NOW + Duration::hours(1) + Duration::days(1));
}

#[test]
fn switching_kind_resets_the_window() {
    let mut draft = rental_draft();
    draft.commit_start(NOW + Duration::days(5));
    draft.set_service_hours(6);

    draft.set_kind(BookingKind::Service, NOW);
    assert_eq!(draft.start(), NOW + Duration::hours(1));
    assert_eq!(draft.end(), NOW + Duration::hours(1) + Duration::days(1));
    assert_eq!(draft.service_hours(), 2);
}

#[test]
fn committing_a_late_start_pushes_the_end() {
    let mut draft = rental_draft();
    let new_start = draft.end() + Duration::hours(2);

    draft.commit_start(new_start);
    assert_eq!(draft.start(), new_start);
    assert_eq!(draft.end(), new_start + Duration::days(1));
}

#[test]
fn committing_an_early_end_clamps_to_an_hour() {
    let mut draft = rental_draft();
    let start = draft.start();

    draft.commit_end(start - Duration::days(2));
    assert_eq!(draft.end(), start + Duration::hours(1));
}

#[test]
fn valid_date_commits_pass_through() {
    let mut draft = rental_draft();
    let start = draft.start();
    let end = start + Duration::days(3);

    draft.commit_end(end);
    assert_eq!(draft.end(), end);
}

// =========================================================================
// handover and address
// =========================================================================

#[test]
fn changing_handover_clears_the_address() {
    let mut draft = rental_draft();
    draft.set_handover(HandoverMethod::Delivery);
    draft.set_address("12 Elm St");
    assert_eq!(draft.address(), Some("12 Elm St"));

    draft.set_handover(HandoverMethod::Meetup);
    assert_eq!(draft.address(), None);

    // Re-selecting the same method keeps it.
    draft.set_address("Central Park entrance");
    draft.set_handover(HandoverMethod::Meetup);
    assert_eq!(draft.address(), Some("Central Park entrance"));
}

#[test]
fn pickup_rentals_need_no_address() {
    let draft = rental_draft();
    assert!(!draft.needs_address());
    assert!(draft.can_submit());
}

#[test]
fn delivery_meetup_and_services_need_one() {
    let mut draft = rental_draft();
    draft.set_handover(HandoverMethod::Delivery);
    assert_eq!(draft.gap(), Some(BookingGap::AddressRequired));

    draft.set_handover(HandoverMethod::Meetup);
    assert_eq!(draft.gap(), Some(BookingGap::AddressRequired));

    let service = BookingDraft::new(BookingKind::Service, 45.0, NOW);
    assert!(service.needs_address());
    assert!(!service.can_submit());
}

#[test]
fn blank_address_does_not_satisfy_the_gate() {
    let mut draft = rental_draft();
    draft.set_handover(HandoverMethod::Delivery);
    draft.set_address("   ");
    assert!(!draft.can_submit());
}

// =========================================================================
// quoting
// =========================================================================

#[test]
fn quote_reflects_the_draft_configuration() {
    let mut draft = rental_draft();
    draft.set_handover(HandoverMethod::Delivery);
    draft.set_address("12 Elm St");
    draft.set_insurance(true);

    let quote = draft.quote();
    assert_eq!(quote.base, 30.0);
    let labels: Vec<&str> = quote.fees.iter().map(|f| f.label).collect();
    assert_eq!(labels, vec!["Delivery Fee", "Damage Protection"]);
    assert!((quote.total - quote.subtotal * 1.10).abs() < 1e-9);
}

#[test]
fn service_quote_uses_hours() {
    let mut draft = BookingDraft::new(BookingKind::Service, 45.0, NOW);
    draft.set_service_hours(3);
    draft.set_address("40 Oak Ave");

    let quote = draft.quote();
    assert_eq!(quote.base, 135.0);
    assert_eq!(quote.subtotal, 145.0);
}

// =========================================================================
// submission
// =========================================================================

#[tokio::test(start_paused = true)]
async fn incomplete_draft_is_rejected_without_charging() {
    let mut draft = rental_draft();
    draft.set_handover(HandoverMethod::Delivery);

    assert_eq!(draft.submit().await, SubmitOutcome::Rejected(BookingGap::AddressRequired));
}

#[tokio::test(start_paused = true)]
async fn complete_draft_confirms_with_the_quoted_total() {
    let mut draft = rental_draft();
    draft.set_insurance(true);
    draft.set_payment(PaymentMethod::Card);

    let SubmitOutcome::Confirmed(receipt) = draft.submit().await else {
        panic!("expected confirmation");
    };
    assert!((receipt.total - draft.quote().total).abs() < 1e-9);
}
