use super::*;
use std::time::Duration;

fn fast_scanner() -> ScanSimulator {
    ScanSimulator::new(
        Duration::from_millis(100),
        Duration::from_millis(150),
        Duration::from_secs(5),
    )
}

// =========================================================================
// outcomes
// =========================================================================

#[tokio::test(start_paused = true)]
async fn scan_completes_after_align_and_read() {
    let scanner = ScanSimulator::default();
    let (job, _handle) = scanner.start();
    assert_eq!(job.await, ScanOutcome::Scanned);
}

#[tokio::test(start_paused = true)]
async fn scan_times_out_when_read_is_too_slow() {
    let scanner = ScanSimulator::new(
        Duration::from_secs(1),
        Duration::from_secs(10),
        Duration::from_secs(2),
    );
    let (job, _handle) = scanner.start();
    assert_eq!(job.await, ScanOutcome::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn cancel_resolves_the_scan() {
    let scanner = fast_scanner();
    let (job, handle) = scanner.start();
    handle.cancel();
    assert_eq!(job.await, ScanOutcome::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels() {
    let scanner = fast_scanner();
    let (job, handle) = scanner.start();
    drop(handle);
    assert_eq!(job.await, ScanOutcome::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn scan_attempt_outlives_the_simulator() {
    // The attempt owns its state outright; dropping the simulator (or
    // mutating it elsewhere) while the attempt runs is fine.
    let scanner = fast_scanner();
    let (job, _handle) = scanner.start();
    drop(scanner);
    assert_eq!(job.await, ScanOutcome::Scanned);
}

// =========================================================================
// phases
// =========================================================================

#[tokio::test(start_paused = true)]
async fn phases_progress_and_return_to_idle() {
    let scanner = fast_scanner();
    let mut phases = scanner.phases();
    assert_eq!(*phases.borrow(), ScanPhase::Idle);

    let (job, _handle) = scanner.start();
    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while phases.changed().await.is_ok() {
            let phase = *phases.borrow();
            seen.push(phase);
            if phase == ScanPhase::Idle {
                break;
            }
        }
        seen
    });

    assert_eq!(job.await, ScanOutcome::Scanned);
    let seen = watcher.await.unwrap();
    assert_eq!(seen, vec![ScanPhase::Aligning, ScanPhase::Scanning, ScanPhase::Idle]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_scan_resets_phase_to_idle() {
    let scanner = fast_scanner();
    let (job, handle) = scanner.start();
    handle.cancel();
    job.await;
    assert_eq!(*scanner.phases().borrow(), ScanPhase::Idle);
}
