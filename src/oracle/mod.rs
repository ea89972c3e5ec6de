//! Candidate validators
//!
//! The search engine only needs a yes/no answer per candidate. Anything that
//! is not an explicit `Ok(true)` counts as a miss. `Err` means the validator
//! cannot work at all and the whole search should stop.

pub mod archive;

pub use archive::ZipOracle;
pub use crate::error::OracleError;

/// A predicate tested against each candidate.
///
/// Called concurrently from every worker thread, so implementations must be
/// `Sync` and must not rely on call order.
pub trait Oracle: Sync {
    fn validate(&self, candidate: &str) -> Result<bool, OracleError>;
}

impl<F> Oracle for F
where
    F: Fn(&str) -> bool + Sync,
{
    fn validate(&self, candidate: &str) -> Result<bool, OracleError> {
        Ok(self(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<O: Oracle>(oracle: &O, candidate: &str) -> bool {
        oracle.validate(candidate).unwrap()
    }

    #[test]
    fn test_closures_are_oracles() {
        let target = String::from("s3cret");
        let oracle = |candidate: &str| candidate == target;
        assert!(check(&oracle, "s3cret"));
        assert!(!check(&oracle, "secret"));
    }
}
