//! Domain core of a peer-to-peer tool-rental marketplace.
//!
//! This crate owns every piece of behavior the marketplace's screens compute:
//! the rental handoff lifecycle (an explicit state machine plus its async
//! session driver), booking pricing, the booking draft flow, the AI-assisted
//! listing wizard, maps-grounded place search, the map view model with its
//! offline fallback, and the explicit UI context. It renders nothing and
//! persists nothing; all state is in-memory and per-session.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Shared domain types: listings, rentals, codes, money formatting |
//! | [`handoff`] | Rental handoff lifecycle machine, simulated scanner, session driver |
//! | [`pricing`] | Pure booking price calculator and related money math |
//! | [`booking`] | Booking draft: dates, handover, address gate, submission |
//! | [`listing`] | Five-step AI-assisted listing wizard |
//! | [`ai`] | `ToolIntel` provider seam and the Gemini client |
//! | [`map`] | Map view model with marker selection and offline fallback |
//! | [`ui`] | Explicit app context and toast queue |

pub mod ai;
pub mod booking;
pub mod handoff;
pub mod listing;
pub mod map;
pub mod model;
pub mod pricing;
pub mod ui;
