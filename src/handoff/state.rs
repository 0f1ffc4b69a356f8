//! Handoff state model: roles, view states, overlays, and events.
//!
//! DESIGN
//! ======
//! The original prototype encoded this machine as string-tag branching
//! (`if viewState === 'x'`). Here every state, overlay, and event is a
//! variant, and each state declares its legal outgoing events in one table
//! (`ViewState::legal_events`) so illegal transitions are rejected rather
//! than silently dropped.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

/// Which side of the handoff this session drives. Fixed at entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Renter,
    Owner,
}

impl Role {
    /// The state a fresh session starts in for this role.
    #[must_use]
    pub fn initial_state(self) -> ViewState {
        match self {
            Self::Renter => ViewState::PickupInfo,
            Self::Owner => ViewState::OwnerPickupInfo,
        }
    }
}

/// Every screen in the handoff flow. Exactly one is current at any time.
///
/// Renter path: `PickupInfo → ScanOwnerQr → ConditionStart → Active →
/// ConditionEnd → ShowRenterQr → Completed`, with `Active → Purchased` as the
/// buyout branch. Owner path: `OwnerPickupInfo → OwnerInspect →
/// OwnerVerifyId → OwnerScanRenter → Active → OwnerReturnInspect →
/// OwnerScanReturn → OwnerRate → OwnerCompleted`. `Active` is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    // Renter path.
    PickupInfo,
    ScanOwnerQr,
    ConditionStart,
    ConditionEnd,
    ShowRenterQr,
    Completed,
    Purchased,
    // Owner path.
    OwnerPickupInfo,
    OwnerInspect,
    OwnerVerifyId,
    OwnerScanRenter,
    OwnerReturnInspect,
    OwnerScanReturn,
    OwnerRate,
    OwnerCompleted,
    // Shared.
    Active,
}

impl ViewState {
    /// The role this state belongs to, or `None` for the shared `Active`
    /// state. Roles never intermix: a session only ever visits states of its
    /// own role plus `Active`.
    #[must_use]
    pub fn role(self) -> Option<Role> {
        match self {
            Self::PickupInfo
            | Self::ScanOwnerQr
            | Self::ConditionStart
            | Self::ConditionEnd
            | Self::ShowRenterQr
            | Self::Completed
            | Self::Purchased => Some(Role::Renter),
            Self::OwnerPickupInfo
            | Self::OwnerInspect
            | Self::OwnerVerifyId
            | Self::OwnerScanRenter
            | Self::OwnerReturnInspect
            | Self::OwnerScanReturn
            | Self::OwnerRate
            | Self::OwnerCompleted => Some(Role::Owner),
            Self::Active => None,
        }
    }

    /// Whether this state awaits the asynchronous scan event.
    #[must_use]
    pub fn is_scan(self) -> bool {
        matches!(self, Self::ScanOwnerQr | Self::OwnerScanRenter | Self::OwnerScanReturn)
    }

    /// Whether this is a terminal state (only exit remains).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::OwnerCompleted | Self::Purchased)
    }

    /// Whether a return flow has begun. From here progression is
    /// forward-only: no legal event leads back to `Active`.
    #[must_use]
    pub fn is_return_path(self) -> bool {
        matches!(
            self,
            Self::ConditionEnd
                | Self::ShowRenterQr
                | Self::OwnerReturnInspect
                | Self::OwnerScanReturn
                | Self::OwnerRate
        )
    }

    /// Where a completed scan lands, for scan states.
    #[must_use]
    pub fn scan_success_target(self) -> Option<ViewState> {
        match self {
            Self::ScanOwnerQr => Some(Self::ConditionStart),
            Self::OwnerScanRenter => Some(Self::Active),
            Self::OwnerScanReturn => Some(Self::OwnerRate),
            _ => None,
        }
    }

    /// Where a cancelled or timed-out scan falls back to: the state that
    /// initiated the scan.
    #[must_use]
    pub fn scan_abort_target(self) -> Option<ViewState> {
        match self {
            Self::ScanOwnerQr => Some(Self::PickupInfo),
            Self::OwnerScanRenter => Some(Self::OwnerVerifyId),
            Self::OwnerScanReturn => Some(Self::OwnerReturnInspect),
            _ => None,
        }
    }

    /// The legal outgoing events for this state. Any event not listed here
    /// is rejected by the machine with `TransitionError::IllegalEvent`.
    #[must_use]
    pub fn legal_events(self) -> &'static [EventKind] {
        use EventKind::*;
        match self {
            Self::PickupInfo => &[BeginScan],
            Self::ScanOwnerQr | Self::OwnerScanRenter | Self::OwnerScanReturn => {
                &[ScanCompleted, ScanCancelled, ScanTimedOut]
            }
            Self::ConditionStart | Self::ConditionEnd | Self::OwnerInspect => {
                &[CapturePhoto, ClearPhoto, ConfirmCondition, OpenModal, CloseModal, SubmitIssue]
            }
            Self::Active => &[
                OpenModal,
                CloseModal,
                SubmitExtension,
                SubmitIssue,
                RequestReturn,
                ConfirmReturn,
                RequestBuyout,
                ConfirmBuyout,
            ],
            Self::ShowRenterQr => &[OwnerScanned],
            Self::OwnerPickupInfo => &[StartHandoff],
            Self::OwnerVerifyId => &[ConfirmIdentity],
            Self::OwnerReturnInspect => &[ConfirmCondition, OpenModal, CloseModal, SubmitIssue],
            Self::OwnerRate => &[SubmitRating],
            Self::Completed | Self::OwnerCompleted | Self::Purchased => &[ExitToDashboard],
        }
    }
}

/// All view states, for exhaustive table checks in tests.
pub const ALL_STATES: [ViewState; 16] = [
    ViewState::PickupInfo,
    ViewState::ScanOwnerQr,
    ViewState::ConditionStart,
    ViewState::ConditionEnd,
    ViewState::ShowRenterQr,
    ViewState::Completed,
    ViewState::Purchased,
    ViewState::OwnerPickupInfo,
    ViewState::OwnerInspect,
    ViewState::OwnerVerifyId,
    ViewState::OwnerScanRenter,
    ViewState::OwnerReturnInspect,
    ViewState::OwnerScanReturn,
    ViewState::OwnerRate,
    ViewState::OwnerCompleted,
    ViewState::Active,
];

/// Side-modal overlays stacked on top of the view state. Orthogonal to the
/// lifecycle: opening or closing one never changes `ViewState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Request extra rental days.
    Extend,
    /// Report a problem with the tool.
    Issue,
    /// Read the owner's rental rules.
    Rules,
    /// Confirmation gate before entering the return flow.
    ConfirmReturn,
    /// Confirmation gate before buyout.
    ConfirmBuyout,
}

/// Issue categories offered by the report-issue modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueKind {
    #[default]
    NotWorking,
    Damaged,
    MissingParts,
    Other,
}

impl IssueKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotWorking => "Tool not working",
            Self::Damaged => "Damaged",
            Self::MissingParts => "Missing parts",
            Self::Other => "Other",
        }
    }
}

/// A captured condition photo. The payload is opaque to the machine; only
/// its presence matters for the return-path gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPhoto {
    /// Encoded image payload (data URI in the prototype).
    pub uri: String,
}

/// User- or scanner-triggered events driving the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Renter taps "Scan Owner's QR" from the pickup screen.
    BeginScan,
    /// Owner taps "Start Handoff Process".
    StartHandoff,
    /// The simulated scanner reported a successful read.
    ScanCompleted,
    /// The user dismissed the scanner before a read.
    ScanCancelled,
    /// The scanner gave up waiting for a read.
    ScanTimedOut,
    /// A condition photo was captured (replaces any prior photo).
    CapturePhoto(ConditionPhoto),
    /// The captured photo was discarded.
    ClearPhoto,
    /// Confirm the current condition check and move on.
    ConfirmCondition,
    /// Owner confirmed the renter matches their profile.
    ConfirmIdentity,
    /// Owner scanned the renter's return code (renter side observes this).
    OwnerScanned,
    /// Open a side modal (Extend / Issue / Rules only).
    OpenModal(Modal),
    /// Close whatever overlay is open.
    CloseModal,
    /// Confirm the extend modal.
    SubmitExtension { days: u32 },
    /// Confirm the issue modal.
    SubmitIssue { kind: IssueKind },
    /// Ask to start the return flow (opens the confirmation gate).
    RequestReturn,
    /// Confirm the return gate; enters the return branch.
    ConfirmReturn,
    /// Ask to buy the tool (opens the confirmation gate). Renter only.
    RequestBuyout,
    /// Confirm the buyout gate; jumps straight to `Purchased`.
    ConfirmBuyout,
    /// Owner submits the renter rating.
    SubmitRating { stars: u8 },
    /// Leave a terminal state.
    ExitToDashboard,
}

impl Event {
    /// Payload-free discriminant used by the legal-event tables.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BeginScan => EventKind::BeginScan,
            Self::StartHandoff => EventKind::StartHandoff,
            Self::ScanCompleted => EventKind::ScanCompleted,
            Self::ScanCancelled => EventKind::ScanCancelled,
            Self::ScanTimedOut => EventKind::ScanTimedOut,
            Self::CapturePhoto(_) => EventKind::CapturePhoto,
            Self::ClearPhoto => EventKind::ClearPhoto,
            Self::ConfirmCondition => EventKind::ConfirmCondition,
            Self::ConfirmIdentity => EventKind::ConfirmIdentity,
            Self::OwnerScanned => EventKind::OwnerScanned,
            Self::OpenModal(_) => EventKind::OpenModal,
            Self::CloseModal => EventKind::CloseModal,
            Self::SubmitExtension { .. } => EventKind::SubmitExtension,
            Self::SubmitIssue { .. } => EventKind::SubmitIssue,
            Self::RequestReturn => EventKind::RequestReturn,
            Self::ConfirmReturn => EventKind::ConfirmReturn,
            Self::RequestBuyout => EventKind::RequestBuyout,
            Self::ConfirmBuyout => EventKind::ConfirmBuyout,
            Self::SubmitRating { .. } => EventKind::SubmitRating,
            Self::ExitToDashboard => EventKind::ExitToDashboard,
        }
    }
}

/// Discriminant of [`Event`], used in [`ViewState::legal_events`] tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    BeginScan,
    StartHandoff,
    ScanCompleted,
    ScanCancelled,
    ScanTimedOut,
    CapturePhoto,
    ClearPhoto,
    ConfirmCondition,
    ConfirmIdentity,
    OwnerScanned,
    OpenModal,
    CloseModal,
    SubmitExtension,
    SubmitIssue,
    RequestReturn,
    ConfirmReturn,
    RequestBuyout,
    ConfirmBuyout,
    SubmitRating,
    ExitToDashboard,
}
