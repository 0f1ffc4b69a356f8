use super::*;

// =========================================================================
// hex codes
// =========================================================================

#[test]
fn bytes_to_hex_encodes_lowercase_pairs() {
    assert_eq!(bytes_to_hex(&[0x00, 0xff, 0x0a]), "00ff0a");
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn handoff_code_is_32_hex_chars() {
    let code = generate_handoff_code();
    assert_eq!(code.len(), 32);
    assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn handoff_codes_are_single_use() {
    assert_ne!(generate_handoff_code(), generate_handoff_code());
}

// =========================================================================
// format_usd
// =========================================================================

#[test]
fn format_usd_rounds_to_cents() {
    assert_eq!(format_usd(0.0), "$0.00");
    assert_eq!(format_usd(159.5), "$159.50");
    assert_eq!(format_usd(10.005), "$10.01");
    assert_eq!(format_usd(1234.5678), "$1234.57");
}

// =========================================================================
// RentalStatus derivation
// =========================================================================

#[test]
fn status_pending_until_active() {
    assert_eq!(RentalStatus::from_view(ViewState::PickupInfo), RentalStatus::PendingPickup);
    assert_eq!(RentalStatus::from_view(ViewState::ScanOwnerQr), RentalStatus::PendingPickup);
    assert_eq!(RentalStatus::from_view(ViewState::OwnerVerifyId), RentalStatus::PendingPickup);
    assert_eq!(RentalStatus::from_view(ViewState::Active), RentalStatus::Active);
}

#[test]
fn status_returning_through_return_flow() {
    assert_eq!(RentalStatus::from_view(ViewState::ConditionEnd), RentalStatus::Returning);
    assert_eq!(RentalStatus::from_view(ViewState::ShowRenterQr), RentalStatus::Returning);
    assert_eq!(RentalStatus::from_view(ViewState::OwnerScanReturn), RentalStatus::Returning);
}

#[test]
fn status_terminal_states() {
    assert_eq!(RentalStatus::from_view(ViewState::Completed), RentalStatus::Completed);
    assert_eq!(RentalStatus::from_view(ViewState::OwnerCompleted), RentalStatus::Completed);
    assert_eq!(RentalStatus::from_view(ViewState::Purchased), RentalStatus::Purchased);
}

#[test]
fn every_view_state_maps_to_a_status() {
    for state in crate::handoff::ALL_STATES {
        // Exhaustiveness is the assertion; from_view must not panic.
        let _ = RentalStatus::from_view(state);
    }
}
