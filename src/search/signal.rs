use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::OracleError;

/// The candidate that satisfied the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub candidate: String,
    pub index: u64,
    pub worker_id: usize,
}

/// Shared stop flag plus write-once result slots.
///
/// The winner slot is filled by exactly one atomic initialisation; every
/// later publisher loses and leaves it untouched. The stop flag is raised
/// with `Release` after the slot is written, so a worker that sees the flag
/// with `Acquire` also sees the complete winner.
#[derive(Debug, Default)]
pub struct TerminationSignal {
    stop: AtomicBool,
    winner: OnceLock<Winner>,
    fatal: OnceLock<OracleError>,
}

impl TerminationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `winner` if nobody has yet. Returns true only for the first caller.
    pub fn try_publish(&self, winner: Winner) -> bool {
        let won = self.winner.set(winner).is_ok();
        if won {
            self.stop.store(true, Ordering::Release);
        }
        won
    }

    /// Record a fatal oracle error and stop the run.
    ///
    /// Returns true only for the first error; later ones are dropped.
    pub fn abort(&self, error: OracleError) -> bool {
        let first = self.fatal.set(error).is_ok();
        self.stop.store(true, Ordering::Release);
        first
    }

    /// Stop the run without a result.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.get()
    }

    pub fn fatal(&self) -> Option<&OracleError> {
        self.fatal.get()
    }

    /// Final outcome of the run. A fatal error takes precedence over a winner.
    pub fn into_outcome(self) -> Result<Option<Winner>, OracleError> {
        match self.fatal.into_inner() {
            Some(error) => Err(error),
            None => Ok(self.winner.into_inner()),
        }
    }
}
