//! Simulated QR scanner — a cancellable await with an explicit timeout.
//!
//! DESIGN
//! ======
//! The prototype faked the scan with two chained fire-and-forget timers
//! (1 s to align, 1.5 s "scanning"). Here the same latency profile is a
//! single awaitable operation with three explicit outcomes: read, timed
//! out, or cancelled. The phase channel lets observers render the
//! align/scanning animation without owning the future.

#[cfg(test)]
#[path = "scan_test.rs"]
mod scan_test;

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tracing::info;

/// Time the simulated camera spends acquiring the code.
pub const DEFAULT_ALIGN_DELAY: Duration = Duration::from_secs(1);
/// Time the simulated decoder spends reading once aligned.
pub const DEFAULT_SCAN_DURATION: Duration = Duration::from_millis(1500);
/// How long to wait for a read before giving up entirely.
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the scanner is in its read cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    /// No scan in progress.
    #[default]
    Idle,
    /// Waiting for the code to enter the frame.
    Aligning,
    /// Code acquired; decoding.
    Scanning,
}

/// Terminal result of one scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The code was read successfully.
    Scanned,
    /// No read arrived within the timeout.
    TimedOut,
    /// The scan was cancelled (explicitly, or by dropping its handle).
    Cancelled,
}

/// Handle for aborting an in-flight scan. Dropping it without calling
/// [`ScanHandle::cancel`] also cancels the scan, mirroring tearing down the
/// scanner view.
#[derive(Debug)]
pub struct ScanHandle {
    tx: oneshot::Sender<()>,
}

impl ScanHandle {
    /// Abort the scan; its future resolves to [`ScanOutcome::Cancelled`].
    pub fn cancel(self) {
        let _ = self.tx.send(());
    }
}

/// Configurable simulated scanner. Clone is cheap; clones share the phase
/// channel.
#[derive(Debug, Clone)]
pub struct ScanSimulator {
    align_delay: Duration,
    scan_duration: Duration,
    timeout: Duration,
    phase: watch::Sender<ScanPhase>,
}

impl Default for ScanSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIGN_DELAY, DEFAULT_SCAN_DURATION, DEFAULT_SCAN_TIMEOUT)
    }
}

impl ScanSimulator {
    #[must_use]
    pub fn new(align_delay: Duration, scan_duration: Duration, timeout: Duration) -> Self {
        let (phase, _) = watch::channel(ScanPhase::Idle);
        Self { align_delay, scan_duration, timeout, phase }
    }

    /// Subscribe to phase changes for rendering the scan animation.
    #[must_use]
    pub fn phases(&self) -> watch::Receiver<ScanPhase> {
        self.phase.subscribe()
    }

    /// Begin a scan, returning the awaitable attempt and its cancel handle.
    /// The attempt owns its state: it borrows nothing from the simulator.
    #[must_use]
    pub fn start(&self) -> (impl Future<Output = ScanOutcome> + Send + use<>, ScanHandle) {
        let (tx, rx) = oneshot::channel();
        (self.clone().run(rx), ScanHandle { tx })
    }

    async fn run(self, mut cancel: oneshot::Receiver<()>) -> ScanOutcome {
        let _ = self.phase.send(ScanPhase::Aligning);

        let read = async {
            tokio::time::sleep(self.align_delay).await;
            let _ = self.phase.send(ScanPhase::Scanning);
            tokio::time::sleep(self.scan_duration).await;
        };

        let outcome = tokio::select! {
            result = tokio::time::timeout(self.timeout, read) => match result {
                Ok(()) => ScanOutcome::Scanned,
                Err(_) => ScanOutcome::TimedOut,
            },
            // A dropped handle counts as cancellation too.
            _ = &mut cancel => ScanOutcome::Cancelled,
        };

        info!(?outcome, "scan finished");
        let _ = self.phase.send(ScanPhase::Idle);
        outcome
    }
}
