//! Parallel exhaustive keyspace search
//!
//! Each worker loops: claim a chunk of indices from the [`WorkPartitioner`],
//! decode each index into a candidate, ask the oracle, publish a match through
//! the [`TerminationSignal`]. The signal is polled before every claim and
//! every candidate, so a match or a fatal oracle error stops all workers
//! within one in-flight validation each.
//!
//! Only four pieces of state cross threads (cursor, stop flag, result slots,
//! progress counter) and all of them are atomics or once-cells. No lock is
//! ever held while the oracle runs.

pub mod config;
pub mod coordinator;
pub mod partition;
pub mod signal;

pub use config::SearchConfig;
pub use coordinator::{SearchCoordinator, SearchReport, search};
pub use partition::WorkPartitioner;
pub use signal::{TerminationSignal, Winner};
