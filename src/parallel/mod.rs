//! Parallel execution infrastructure
//!
//! This module owns **system resource management** and **thread lifetime**.
//! It knows nothing about keyspaces or validators; the search coordinator
//! supplies the work.
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies user limits (thread percentage, max threads)
//! - **Thread Management**: Spawns named scoped workers plus an optional monitor,
//!   joins them, and turns spawn failures and panics into errors
//! - **Progress Accounting**: Lock-free completion counter and a periodic observer
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │  Coordinator    │    │   WorkerPool     │    │  OS threads     │
//! │                 │───▶│                  │───▶│                 │
//! │ • claim loop    │    │ • spawn / join   │    │ • worker-0..N   │
//! │ • shared state  │    │ • cancel on fail │    │ • progress      │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use crossbeam::channel::Receiver;
//! use keysweep::parallel::{WorkerPool, ProgressTracker};
//!
//! let progress = ProgressTracker::new();
//! let pool = WorkerPool::new(4);
//! pool.run(|_worker_id| progress.increment(), None::<fn(Receiver<()>)>, || {}).unwrap();
//! assert_eq!(progress.completed(), 4);
//! ```

pub mod core;
pub mod progress;

pub use self::core::WorkerPool;
pub use progress::{ProgressTracker, observe};
