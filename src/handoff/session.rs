//! Async session driver: runs one handoff machine on a tokio task.
//!
//! DESIGN
//! ======
//! The session owns the machine and serializes everything that touches it:
//! user events arrive over a channel, a scan is armed automatically whenever
//! the machine enters a scan state, and the elapsed ticker fires only while
//! the state is `Active`. Transitions are therefore applied strictly in the
//! order their triggering events resolve — there is no concurrent mutation.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::machine::{Applied, HandoffMachine};
use super::scan::{ScanOutcome, ScanSimulator};
use super::state::{Event, Role, ViewState};

const CHANNEL_CAPACITY: usize = 32;

/// One update emitted by the session after processing an input.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    /// The view state after the change.
    pub state: ViewState,
    pub change: SessionChange,
}

/// What happened inside the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChange {
    /// An event was applied to the machine.
    Applied(Applied),
    /// The elapsed counter advanced (value in seconds).
    Elapsed(u64),
    /// An event was rejected as illegal; the machine is untouched.
    Rejected(String),
    /// The session ended (terminal exit or all handles dropped).
    Ended,
}

/// Client handle to a spawned session.
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::Sender<Event>,
    updates: mpsc::Receiver<SessionUpdate>,
}

impl SessionHandle {
    /// Queue an event for the session. Returns `false` if the session is
    /// gone.
    pub async fn send(&self, event: Event) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Receive the next session update, or `None` once the session ends.
    pub async fn recv(&mut self) -> Option<SessionUpdate> {
        self.updates.recv().await
    }
}

/// Spawn a session for the given role onto the current tokio runtime.
#[must_use]
pub fn spawn(role: Role, rate_per_day: f64, scanner: ScanSimulator) -> SessionHandle {
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (update_tx, update_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let session = HandoffSession {
        machine: HandoffMachine::new(role, rate_per_day),
        scanner,
        events: event_rx,
        updates: update_tx,
    };
    tokio::spawn(session.run());
    SessionHandle { events: event_tx, updates: update_rx }
}

struct HandoffSession {
    machine: HandoffMachine,
    scanner: ScanSimulator,
    events: mpsc::Receiver<Event>,
    updates: mpsc::Sender<SessionUpdate>,
}

impl HandoffSession {
    async fn run(mut self) {
        info!(role = ?self.machine.role(), state = ?self.machine.state(), "handoff session started");

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let was_active = self.machine.state() == ViewState::Active;
            let keep_going = if self.machine.state().is_scan() {
                self.await_scan().await
            } else {
                self.await_input(&mut ticker).await
            };
            // Align the first counted second to entry into `Active`, no
            // matter which path landed there.
            if !was_active && self.machine.state() == ViewState::Active {
                ticker.reset();
            }
            if !keep_going {
                break;
            }
        }

        let _ = self
            .updates
            .send(SessionUpdate { state: self.machine.state(), change: SessionChange::Ended })
            .await;
        info!(state = ?self.machine.state(), "handoff session ended");
    }

    /// Drive one scan attempt to its outcome, servicing user input while it
    /// runs. A `ScanCancelled` event routes through the scanner's cancel
    /// handle so the outcome still arrives from the scan itself.
    async fn await_scan(&mut self) -> bool {
        let (job, handle) = self.scanner.start();
        tokio::pin!(job);
        let mut handle = Some(handle);

        let outcome = loop {
            tokio::select! {
                outcome = &mut job => break outcome,
                event = self.events.recv() => match event {
                    None => return false,
                    Some(Event::ScanCancelled) => {
                        if let Some(handle) = handle.take() {
                            handle.cancel();
                        }
                    }
                    // The in-flight scan owns its outcome; injected
                    // outcomes are dropped rather than applied early.
                    Some(Event::ScanCompleted | Event::ScanTimedOut) => {}
                    Some(other) => {
                        // Anything else is rejected by the legal tables.
                        if !self.apply_and_publish(other).await {
                            return false;
                        }
                    }
                },
            }
        };

        let event = match outcome {
            ScanOutcome::Scanned => Event::ScanCompleted,
            ScanOutcome::TimedOut => Event::ScanTimedOut,
            ScanOutcome::Cancelled => Event::ScanCancelled,
        };
        self.apply_and_publish(event).await
    }

    /// Service user input and, while `Active`, the elapsed ticker.
    async fn await_input(&mut self, ticker: &mut tokio::time::Interval) -> bool {
        let was_active = self.machine.state() == ViewState::Active;

        tokio::select! {
            _ = ticker.tick(), if was_active => {
                self.machine.tick();
                let update = SessionUpdate {
                    state: self.machine.state(),
                    change: SessionChange::Elapsed(self.machine.elapsed_secs()),
                };
                self.updates.send(update).await.is_ok()
            }
            event = self.events.recv() => {
                let Some(event) = event else { return false };
                self.apply_and_publish(event).await
            }
        }
    }

    /// Apply one event, publish the result, and report whether the session
    /// should keep running.
    async fn apply_and_publish(&mut self, event: Event) -> bool {
        match self.machine.apply(event) {
            Ok(applied) => {
                let exited = applied == Applied::Exited;
                let update = SessionUpdate {
                    state: self.machine.state(),
                    change: SessionChange::Applied(applied),
                };
                self.updates.send(update).await.is_ok() && !exited
            }
            Err(e) => {
                let update = SessionUpdate {
                    state: self.machine.state(),
                    change: SessionChange::Rejected(e.to_string()),
                };
                self.updates.send(update).await.is_ok()
            }
        }
    }
}
