//! The rental handoff machine: one explicit transition function.
//!
//! DESIGN
//! ======
//! `HandoffMachine::apply` is the only way the view state changes. Events
//! outside the current state's legal table are errors; gated actions that
//! are merely unavailable (no photo yet, confirmation not open) are recorded
//! no-ops, matching the prototype's disabled-button behavior.
//!
//! The elapsed counter is advanced by `tick`, which the async session driver
//! calls once per second — and only ever lands while the state is `Active`,
//! so the counter can never drift after leaving it.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use tracing::{info, warn};

use super::state::{ConditionPhoto, Event, EventKind, Modal, Role, ViewState};
use crate::model::generate_handoff_code;
use crate::pricing::extension_cost;

/// Result of applying an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The view state changed.
    Moved { from: ViewState, to: ViewState },
    /// An overlay was stacked on the current state.
    OverlayOpened(Modal),
    /// The open overlay was dismissed.
    OverlayClosed,
    /// A transient notification for the toast queue. The view state is
    /// unchanged.
    Notice(String),
    /// A condition photo was stored.
    PhotoCaptured,
    /// The stored condition photo was discarded.
    PhotoCleared,
    /// The event was legal but currently unavailable; nothing changed.
    Ignored(IgnoreReason),
    /// A terminal state was exited; the session is over.
    Exited,
}

/// Why a legal event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Return-path condition confirm requires a captured photo.
    PhotoRequired,
    /// The event acts on an overlay that is not open.
    OverlayNotOpen,
}

/// Rejected events.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The event is not in the current state's legal table.
    #[error("event {event:?} is not legal in state {state:?}")]
    IllegalEvent { state: ViewState, event: EventKind },

    /// The event belongs to the other role.
    #[error("event {event:?} is not available to the {role:?} role")]
    RoleForbidden { role: Role, event: EventKind },

    /// The modal cannot be opened directly; it is a confirmation gate.
    #[error("modal {modal:?} opens only through its request event")]
    ModalNotOpenable { modal: Modal },

    /// The modal is not available in the current state.
    #[error("modal {modal:?} is not available in state {state:?}")]
    ModalUnavailable { state: ViewState, modal: Modal },
}

/// The handoff lifecycle machine for one participant of one rental.
#[derive(Debug, Clone)]
pub struct HandoffMachine {
    role: Role,
    state: ViewState,
    overlay: Option<Modal>,
    photo: Option<ConditionPhoto>,
    elapsed_secs: u64,
    rate_per_day: f64,
    return_code: Option<String>,
    rating: Option<u8>,
}

impl HandoffMachine {
    /// Start a session in the given role, at that role's initial state.
    #[must_use]
    pub fn new(role: Role, rate_per_day: f64) -> Self {
        Self {
            role,
            state: role.initial_state(),
            overlay: None,
            photo: None,
            elapsed_secs: 0,
            rate_per_day,
            return_code: None,
            rating: None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn overlay(&self) -> Option<Modal> {
        self.overlay
    }

    #[must_use]
    pub fn photo(&self) -> Option<&ConditionPhoto> {
        self.photo.as_ref()
    }

    /// Seconds spent in the `Active` state so far.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// The return code shown while in `ShowRenterQr`, if generated.
    #[must_use]
    pub fn return_code(&self) -> Option<&str> {
        self.return_code.as_deref()
    }

    /// The renter rating submitted by the owner, if any.
    #[must_use]
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// Advance the elapsed counter by one second. Counts only while the
    /// state is `Active`; returns whether the tick was counted.
    pub fn tick(&mut self) -> bool {
        if self.state == ViewState::Active {
            self.elapsed_secs += 1;
            true
        } else {
            false
        }
    }

    /// Apply one event to the machine.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when the event is not legal in the
    /// current state or role. Gated-but-unavailable actions return
    /// `Ok(Applied::Ignored(_))` instead.
    #[allow(clippy::too_many_lines)]
    pub fn apply(&mut self, event: Event) -> Result<Applied, TransitionError> {
        let kind = event.kind();
        if !self.state.legal_events().contains(&kind) {
            return Err(TransitionError::IllegalEvent { state: self.state, event: kind });
        }

        match event {
            Event::BeginScan => Ok(self.move_to(ViewState::ScanOwnerQr)),
            Event::StartHandoff => Ok(self.move_to(ViewState::OwnerInspect)),

            Event::ScanCompleted => {
                // Legal table guarantees a scan state; target is total there.
                let Some(target) = self.state.scan_success_target() else {
                    return Err(TransitionError::IllegalEvent { state: self.state, event: kind });
                };
                info!(from = ?self.state, to = ?target, "handoff: scan completed");
                Ok(self.move_to(target))
            }
            Event::ScanCancelled | Event::ScanTimedOut => {
                let Some(target) = self.state.scan_abort_target() else {
                    return Err(TransitionError::IllegalEvent { state: self.state, event: kind });
                };
                if kind == EventKind::ScanTimedOut {
                    warn!(from = ?self.state, "handoff: scan timed out, returning to previous screen");
                }
                Ok(self.move_to(target))
            }

            Event::CapturePhoto(photo) => {
                self.photo = Some(photo);
                Ok(Applied::PhotoCaptured)
            }
            Event::ClearPhoto => {
                self.photo = None;
                Ok(Applied::PhotoCleared)
            }
            Event::ConfirmCondition => self.confirm_condition(),

            Event::ConfirmIdentity => Ok(self.move_to(ViewState::OwnerScanRenter)),
            Event::OwnerScanned => Ok(self.move_to(ViewState::Completed)),

            Event::OpenModal(modal) => self.open_modal(modal),
            Event::CloseModal => {
                if self.overlay.take().is_some() {
                    Ok(Applied::OverlayClosed)
                } else {
                    Ok(Applied::Ignored(IgnoreReason::OverlayNotOpen))
                }
            }
            Event::SubmitExtension { days } => {
                if self.overlay != Some(Modal::Extend) {
                    return Ok(Applied::Ignored(IgnoreReason::OverlayNotOpen));
                }
                self.overlay = None;
                let cost = extension_cost(days, self.rate_per_day);
                info!(days, cost, "handoff: extension requested");
                let plural = if days == 1 { "" } else { "s" };
                Ok(Applied::Notice(format!("Request sent to extend by {days} day{plural}")))
            }
            Event::SubmitIssue { kind } => {
                if self.overlay != Some(Modal::Issue) {
                    return Ok(Applied::Ignored(IgnoreReason::OverlayNotOpen));
                }
                self.overlay = None;
                info!(issue = kind.label(), "handoff: issue reported");
                Ok(Applied::Notice("Issue reported. Support will contact you shortly.".into()))
            }

            Event::RequestReturn => {
                self.overlay = Some(Modal::ConfirmReturn);
                Ok(Applied::OverlayOpened(Modal::ConfirmReturn))
            }
            Event::ConfirmReturn => {
                if self.overlay != Some(Modal::ConfirmReturn) {
                    return Ok(Applied::Ignored(IgnoreReason::OverlayNotOpen));
                }
                self.overlay = None;
                let target = match self.role {
                    Role::Renter => ViewState::ConditionEnd,
                    Role::Owner => ViewState::OwnerReturnInspect,
                };
                Ok(self.move_to(target))
            }

            Event::RequestBuyout => {
                if self.role == Role::Owner {
                    return Err(TransitionError::RoleForbidden { role: self.role, event: kind });
                }
                self.overlay = Some(Modal::ConfirmBuyout);
                Ok(Applied::OverlayOpened(Modal::ConfirmBuyout))
            }
            Event::ConfirmBuyout => {
                if self.role == Role::Owner {
                    return Err(TransitionError::RoleForbidden { role: self.role, event: kind });
                }
                if self.overlay != Some(Modal::ConfirmBuyout) {
                    return Ok(Applied::Ignored(IgnoreReason::OverlayNotOpen));
                }
                self.overlay = None;
                Ok(self.move_to(ViewState::Purchased))
            }

            Event::SubmitRating { stars } => {
                self.rating = Some(stars.clamp(1, 5));
                Ok(self.move_to(ViewState::OwnerCompleted))
            }

            Event::ExitToDashboard => {
                info!(state = ?self.state, "handoff: session exited");
                Ok(Applied::Exited)
            }
        }
    }

    /// Condition-check confirm. The photo gate applies only on the renter's
    /// return check (`ConditionEnd`); pickup-side checks proceed without a
    /// photo. Confirming always discards the captured photo.
    fn confirm_condition(&mut self) -> Result<Applied, TransitionError> {
        let target = match self.state {
            ViewState::ConditionStart => ViewState::Active,
            ViewState::ConditionEnd => {
                if self.photo.is_none() {
                    return Ok(Applied::Ignored(IgnoreReason::PhotoRequired));
                }
                ViewState::ShowRenterQr
            }
            ViewState::OwnerInspect => ViewState::OwnerVerifyId,
            ViewState::OwnerReturnInspect => ViewState::OwnerScanReturn,
            state => {
                return Err(TransitionError::IllegalEvent {
                    state,
                    event: EventKind::ConfirmCondition,
                });
            }
        };
        self.photo = None;
        Ok(self.move_to(target))
    }

    fn open_modal(&mut self, modal: Modal) -> Result<Applied, TransitionError> {
        match modal {
            Modal::ConfirmReturn | Modal::ConfirmBuyout => {
                Err(TransitionError::ModalNotOpenable { modal })
            }
            Modal::Extend | Modal::Rules if self.state != ViewState::Active => {
                Err(TransitionError::ModalUnavailable { state: self.state, modal })
            }
            Modal::Extend | Modal::Rules | Modal::Issue => {
                self.overlay = Some(modal);
                Ok(Applied::OverlayOpened(modal))
            }
        }
    }

    /// Place the machine directly into a state, for table-driven tests.
    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: ViewState) {
        self.state = state;
        self.overlay = None;
        self.photo = None;
    }

    fn move_to(&mut self, to: ViewState) -> Applied {
        let from = self.state;
        self.state = to;
        self.overlay = None;
        if to == ViewState::ShowRenterQr {
            self.return_code = Some(generate_handoff_code());
        }
        Applied::Moved { from, to }
    }
}

/// Render elapsed seconds as `HH:MM:SS`.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}
