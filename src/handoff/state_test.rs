use super::*;

// =========================================================================
// role partition
// =========================================================================

#[test]
fn active_is_the_only_shared_state() {
    for state in ALL_STATES {
        if state == ViewState::Active {
            assert_eq!(state.role(), None);
        } else {
            assert!(state.role().is_some(), "{state:?} must belong to a role");
        }
    }
}

#[test]
fn initial_states_match_their_roles() {
    assert_eq!(Role::Renter.initial_state(), ViewState::PickupInfo);
    assert_eq!(Role::Owner.initial_state(), ViewState::OwnerPickupInfo);
    assert_eq!(ViewState::PickupInfo.role(), Some(Role::Renter));
    assert_eq!(ViewState::OwnerPickupInfo.role(), Some(Role::Owner));
}

// =========================================================================
// scan targets
// =========================================================================

#[test]
fn scan_states_have_both_targets() {
    for state in ALL_STATES {
        assert_eq!(state.is_scan(), state.scan_success_target().is_some());
        assert_eq!(state.is_scan(), state.scan_abort_target().is_some());
    }
}

#[test]
fn scan_abort_returns_to_initiating_state() {
    assert_eq!(ViewState::ScanOwnerQr.scan_abort_target(), Some(ViewState::PickupInfo));
    assert_eq!(ViewState::OwnerScanRenter.scan_abort_target(), Some(ViewState::OwnerVerifyId));
    assert_eq!(
        ViewState::OwnerScanReturn.scan_abort_target(),
        Some(ViewState::OwnerReturnInspect)
    );
}

#[test]
fn scan_success_advances_the_flow() {
    assert_eq!(ViewState::ScanOwnerQr.scan_success_target(), Some(ViewState::ConditionStart));
    assert_eq!(ViewState::OwnerScanRenter.scan_success_target(), Some(ViewState::Active));
    assert_eq!(ViewState::OwnerScanReturn.scan_success_target(), Some(ViewState::OwnerRate));
}

// =========================================================================
// legal-event tables
// =========================================================================

#[test]
fn every_state_has_legal_events() {
    for state in ALL_STATES {
        assert!(!state.legal_events().is_empty(), "{state:?} would be a dead end");
    }
}

#[test]
fn terminal_states_only_exit() {
    for state in ALL_STATES {
        if state.is_terminal() {
            assert_eq!(state.legal_events(), &[EventKind::ExitToDashboard]);
        } else {
            assert!(!state.legal_events().contains(&EventKind::ExitToDashboard));
        }
    }
}

#[test]
fn scan_states_accept_only_scan_outcomes() {
    for state in ALL_STATES.into_iter().filter(|s| s.is_scan()) {
        assert_eq!(
            state.legal_events(),
            &[EventKind::ScanCompleted, EventKind::ScanCancelled, EventKind::ScanTimedOut]
        );
    }
}

#[test]
fn return_path_never_reenters_active() {
    // Once the return flow begins, no state offers the events that lead back
    // to Active (scan success from OwnerScanReturn lands on OwnerRate).
    for state in ALL_STATES.into_iter().filter(|s| s.is_return_path()) {
        assert!(!state.legal_events().contains(&EventKind::RequestBuyout));
        if let Some(target) = state.scan_success_target() {
            assert_ne!(target, ViewState::Active);
        }
    }
}

// =========================================================================
// events
// =========================================================================

#[test]
fn event_kind_strips_payloads() {
    assert_eq!(
        Event::CapturePhoto(ConditionPhoto { uri: "data:image/png;base64,AAAA".into() }).kind(),
        EventKind::CapturePhoto
    );
    assert_eq!(Event::SubmitExtension { days: 3 }.kind(), EventKind::SubmitExtension);
    assert_eq!(Event::OpenModal(Modal::Rules).kind(), EventKind::OpenModal);
    assert_eq!(Event::SubmitIssue { kind: IssueKind::Damaged }.kind(), EventKind::SubmitIssue);
}

#[test]
fn issue_kinds_have_labels() {
    assert_eq!(IssueKind::NotWorking.label(), "Tool not working");
    assert_eq!(IssueKind::default(), IssueKind::NotWorking);
}
