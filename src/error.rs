//! Error types for keyspace searches
//!
//! Configuration problems are detected before any worker thread starts.
//! Oracle failures are fatal for the whole run and surface exactly once.
//! Ordinary non-matching candidates are never errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a validator to function at all.
///
/// A wrong candidate is reported as `Ok(false)` by the oracle, not as this
/// error. This type is reserved for conditions that make every further
/// attempt pointless, such as a target file that cannot be read.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("cannot access {}: {reason}", resource.display())]
    Unavailable { resource: PathBuf, reason: String },
}

impl OracleError {
    pub fn unavailable(resource: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Unavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("alphabet contains duplicate symbol {0:?}")]
    DuplicateSymbol(char),

    #[error("candidate length must be at least 1")]
    InvalidLength,

    #[error("keyspace of {base}^{length} candidates does not fit in a 64-bit index")]
    KeyspaceOverflow { base: usize, length: usize },

    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("progress interval must be at least 1 ms")]
    InvalidProgressInterval,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("failed to start worker thread: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("a worker thread panicked during the search")]
    WorkerPanicked,
}

impl SearchError {
    /// Short name of the fatal category, used in user-facing messages
    pub fn category(&self) -> &'static str {
        match self {
            SearchError::EmptyAlphabet
            | SearchError::DuplicateSymbol(_)
            | SearchError::InvalidLength
            | SearchError::KeyspaceOverflow { .. }
            | SearchError::InvalidChunkSize
            | SearchError::InvalidWorkerCount
            | SearchError::InvalidProgressInterval => "configuration",
            SearchError::Oracle(_) => "resource access",
            SearchError::WorkerSpawn(_) | SearchError::WorkerPanicked => "worker pool",
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.category() == "configuration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(SearchError::InvalidLength.category(), "configuration");
        assert!(SearchError::KeyspaceOverflow { base: 62, length: 11 }.is_configuration());

        let oracle = SearchError::from(OracleError::unavailable("/tmp/missing.zip", "not found"));
        assert_eq!(oracle.category(), "resource access");
        assert!(!oracle.is_configuration());

        assert_eq!(SearchError::WorkerPanicked.category(), "worker pool");
    }

    #[test]
    fn test_oracle_error_message() {
        let err = OracleError::unavailable("/tmp/secret.zip", "permission denied");
        assert_eq!(
            err.to_string(),
            "cannot access /tmp/secret.zip: permission denied"
        );
    }
}
