use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError};

/// Completed-work counter shared by all workers
///
/// Monotonically non-decreasing. Workers bump it without coordination; the
/// observer reads it without blocking anyone.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    completed: AtomicU64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Completed work as a percentage of `total`, 100% for an empty workload
    pub fn percentage(&self, total: u64) -> f64 {
        percentage(self.completed(), total)
    }
}

pub fn percentage(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Periodically report `tracker` until `done` disconnects.
///
/// Calls `reporter(completed, total)` once per `interval` and a final time
/// after the workers are gone, so the last report always carries the final
/// count. Intended to run on the pool's monitor thread.
pub fn observe<P>(tracker: &ProgressTracker, total: u64, interval: Duration, done: Receiver<()>, reporter: P)
where
    P: Fn(u64, u64),
{
    loop {
        match done.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => reporter(tracker.completed(), total),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    reporter(tracker.completed(), total);
}
