//! Rental handoff lifecycle: states, transition machine, simulated scanner,
//! and the async session driver that wires them together.

pub mod machine;
pub mod scan;
pub mod session;
pub mod state;

pub use machine::{Applied, HandoffMachine, IgnoreReason, TransitionError, format_elapsed};
pub use scan::{ScanHandle, ScanOutcome, ScanPhase, ScanSimulator};
pub use session::{SessionChange, SessionHandle, SessionUpdate, spawn};
pub use state::{ALL_STATES, ConditionPhoto, Event, EventKind, IssueKind, Modal, Role, ViewState};
