//! # keysweep - Parallel exhaustive keyspace search
//!
//! keysweep enumerates every fixed-length string over an alphabet, splits the
//! index range into chunks claimed by worker threads and stops all workers as
//! soon as one candidate is accepted by a validator (an [`Oracle`]).
//!
//! ## Quick Start
//!
//! ```bash
//! # Recover a 4 character password of a ZipCrypto archive
//! keysweep crack 4 secret.zip
//!
//! # Restrict the alphabet and the number of workers
//! keysweep crack 6 secret.zip --alphabet 0123456789 --workers 8
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use keysweep::{Alphabet, search};
//!
//! let alphabet = Alphabet::new("xyz").unwrap();
//! let found = search(alphabet, 3, &|candidate: &str| candidate == "zyx", 4).unwrap();
//! assert_eq!(found.as_deref(), Some("zyx"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod keyspace;
pub mod oracle;
pub mod parallel;
pub mod search;

pub use config::{KeysweepConfig, Settings};
pub use error::{OracleError, SearchError};
pub use keyspace::{Alphabet, KeySpace};
pub use oracle::{Oracle, ZipOracle};
pub use search::{SearchConfig, SearchCoordinator, SearchReport, search};
