//! Explicit UI context: theme flag and the transient-toast queue.
//!
//! DESIGN
//! ======
//! Plain data passed explicitly to whoever renders it. Nothing here is
//! global; a test constructs its own context and clock.

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// App-wide presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppContext {
    pub dark_mode: bool,
}

impl AppContext {
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    expires_at: Instant,
}

/// FIFO queue of live toasts. The caller supplies the clock so expiry is
/// deterministic under test.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a toast visible until `now + TOAST_TTL`.
    pub fn push(&mut self, text: impl Into<String>, now: Instant) {
        self.toasts.push(Toast { text: text.into(), expires_at: now + TOAST_TTL });
    }

    /// Drop every toast whose TTL has elapsed as of `now`.
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Live toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
