use std::time::{Duration, Instant};

use crossbeam::channel::Receiver;

use super::config::SearchConfig;
use super::partition::WorkPartitioner;
use super::signal::{TerminationSignal, Winner};
use crate::error::SearchError;
use crate::keyspace::{Alphabet, KeySpace};
use crate::oracle::Oracle;
use crate::parallel::{ProgressTracker, WorkerPool, observe};

/// Outcome of a completed (or early-terminated) run.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub winner: Option<Winner>,
    pub total: u64,
    /// Candidates handed to the oracle
    pub attempted: u64,
    pub chunks_claimed: u64,
    pub chunk_count: u64,
    pub workers: usize,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn found(&self) -> bool {
        self.winner.is_some()
    }

    pub fn candidate(&self) -> Option<&str> {
        self.winner.as_ref().map(|w| w.candidate.as_str())
    }

    pub fn into_candidate(self) -> Option<String> {
        self.winner.map(|w| w.candidate)
    }

    /// Candidates tested per second over the whole run
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.attempted as f64 / secs } else { 0.0 }
    }
}

/// State shared by every worker of one run, borrowed for the run's duration.
struct RunState<'a, O: ?Sized> {
    space: &'a KeySpace,
    oracle: &'a O,
    partitioner: WorkPartitioner,
    signal: TerminationSignal,
    progress: ProgressTracker,
}

impl<O: Oracle + ?Sized> RunState<'_, O> {
    fn work(&self, worker_id: usize) {
        let mut candidate = String::with_capacity(self.space.length());
        let mut attempted = 0u64;

        'claims: while !self.signal.is_set() {
            let Some(chunk) = self.partitioner.claim_next() else {
                break;
            };

            for index in chunk {
                if self.signal.is_set() {
                    break 'claims;
                }
                if !self.space.decode_into(index, &mut candidate) {
                    continue;
                }

                match self.oracle.validate(&candidate) {
                    Ok(true) => {
                        let winner = Winner {
                            candidate: candidate.clone(),
                            index,
                            worker_id,
                        };
                        if self.signal.try_publish(winner) {
                            tracing::info!("Worker {} found a match at index {}", worker_id, index);
                        } else {
                            tracing::debug!("Worker {} matched index {} after a winner was published", worker_id, index);
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        if self.signal.abort(e) {
                            tracing::error!("Worker {} stopped the search: oracle failed", worker_id);
                        }
                    }
                }

                self.progress.increment();
                attempted += 1;
            }
        }

        tracing::debug!("Worker {} finished after {} candidates", worker_id, attempted);
    }
}

/// Drives a parallel search over one keyspace.
///
/// ```rust
/// use keysweep::keyspace::{Alphabet, KeySpace};
/// use keysweep::search::{SearchConfig, SearchCoordinator};
///
/// let space = KeySpace::new(Alphabet::new("abc").unwrap(), 4).unwrap();
/// let coordinator = SearchCoordinator::new(space, SearchConfig::default().with_workers(2)).unwrap();
///
/// let report = coordinator.run(&|candidate: &str| candidate == "cabb").unwrap();
/// assert_eq!(report.candidate(), Some("cabb"));
/// ```
#[derive(Debug, Clone)]
pub struct SearchCoordinator {
    space: KeySpace,
    config: SearchConfig,
}

impl SearchCoordinator {
    pub fn new(space: KeySpace, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { space, config })
    }

    pub fn space(&self) -> &KeySpace {
        &self.space
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn chunk_count(&self) -> u64 {
        self.space.total().div_ceil(self.config.chunk_size)
    }

    /// Worker threads a run will start
    pub fn workers(&self) -> usize {
        self.config.resolve_workers(self.chunk_count())
    }

    pub fn run<O>(&self, oracle: &O) -> Result<SearchReport, SearchError>
    where
        O: Oracle + ?Sized,
    {
        self.execute(oracle, None::<fn(u64, u64)>)
    }

    /// Like [`SearchCoordinator::run`], calling `reporter(completed, total)` from a
    /// dedicated observer thread every `progress_interval`, and once at the end.
    pub fn run_with_progress<O, P>(&self, oracle: &O, reporter: P) -> Result<SearchReport, SearchError>
    where
        O: Oracle + ?Sized,
        P: Fn(u64, u64) + Send,
    {
        self.execute(oracle, Some(reporter))
    }

    fn execute<O, P>(&self, oracle: &O, reporter: Option<P>) -> Result<SearchReport, SearchError>
    where
        O: Oracle + ?Sized,
        P: Fn(u64, u64) + Send,
    {
        let start = Instant::now();
        let total = self.space.total();
        let workers = self.workers();

        let state = RunState {
            space: &self.space,
            oracle,
            partitioner: WorkPartitioner::new(total, self.config.chunk_size)?,
            signal: TerminationSignal::new(),
            progress: ProgressTracker::new(),
        };

        tracing::info!(
            "Searching {} candidates with {} workers (chunk size {})",
            total,
            workers,
            self.config.chunk_size
        );

        let interval = self.config.progress_interval;
        let monitor = reporter.map(|reporter| {
            let progress = &state.progress;
            move |done: Receiver<()>| observe(progress, total, interval, done, reporter)
        });

        WorkerPool::new(workers).run(
            |worker_id| state.work(worker_id),
            monitor,
            || state.signal.cancel(),
        )?;

        let attempted = state.progress.completed();
        let chunks_claimed = state.partitioner.chunks_claimed();
        let chunk_count = state.partitioner.chunk_count();
        let winner = state.signal.into_outcome()?;

        let report = SearchReport {
            winner,
            total,
            attempted,
            chunks_claimed,
            chunk_count,
            workers,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Search finished in {:.2}s: {} of {} candidates tested, {} of {} chunks claimed",
            report.elapsed.as_secs_f64(),
            report.attempted,
            report.total,
            report.chunks_claimed,
            report.chunk_count
        );

        Ok(report)
    }
}

/// Search every `length`-symbol string over `alphabet` with `worker_count`
/// threads, returning the candidate the oracle accepted, if any.
///
/// The keyspace and configuration are validated before any thread starts.
pub fn search<O>(
    alphabet: Alphabet,
    length: usize,
    oracle: &O,
    worker_count: usize,
) -> Result<Option<String>, SearchError>
where
    O: Oracle + ?Sized,
{
    let space = KeySpace::new(alphabet, length)?;
    let config = SearchConfig::default().with_workers(worker_count);
    let report = SearchCoordinator::new(space, config)?.run(oracle)?;
    Ok(report.into_candidate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::keyspace::DEFAULT_ALPHABET;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    fn coordinator(symbols: &str, length: usize, workers: usize, chunk_size: u64) -> SearchCoordinator {
        let space = KeySpace::new(Alphabet::new(symbols).unwrap(), length).unwrap();
        let config = SearchConfig::default()
            .with_workers(workers)
            .with_chunk_size(chunk_size);
        SearchCoordinator::new(space, config).unwrap()
    }

    #[test]
    fn test_single_match_is_found() {
        let coord = coordinator("abcdefghij", 4, 4, 100);
        let target = coord.space().decode(7_321).unwrap();

        let report = coord.run(&|candidate: &str| candidate == target).unwrap();
        let winner = report.winner.unwrap();
        assert_eq!(winner.candidate, target);
        assert_eq!(winner.index, 7_321);
        assert!(winner.worker_id < 4);
    }

    #[test]
    fn test_last_index_is_reachable() {
        let coord = coordinator("xyz", 5, 3, 7);
        let last = coord.space().decode(coord.space().total() - 1).unwrap();
        assert_eq!(last, "zzzzz");

        let report = coord.run(&|candidate: &str| candidate == last).unwrap();
        assert_eq!(report.candidate(), Some("zzzzz"));
    }

    #[test]
    fn test_multiple_matches_yield_exactly_one() {
        let coord = coordinator("0123456789", 5, 8, 50);
        let matching: HashSet<u64> = [10, 4_999, 50_000, 99_999].into_iter().collect();
        let space = coord.space().clone();

        for _ in 0..10 {
            let report = coord
                .run(&|candidate: &str| matching.contains(&space.encode(candidate).unwrap()))
                .unwrap();
            let winner = report.winner.expect("one of the matches must be returned");
            assert!(matching.contains(&winner.index));
            assert_eq!(space.decode(winner.index).unwrap(), winner.candidate);
        }
    }

    #[test]
    fn test_no_match_attempts_every_index_once() {
        let coord = coordinator("abcde", 6, 6, 33);
        let space = coord.space().clone();
        let hits: Vec<AtomicUsize> = (0..space.total()).map(|_| AtomicUsize::new(0)).collect();

        let report = coord
            .run(&|candidate: &str| {
                hits[space.encode(candidate).unwrap() as usize].fetch_add(1, Ordering::Relaxed);
                false
            })
            .unwrap();

        assert!(report.winner.is_none());
        assert_eq!(report.attempted, space.total());
        assert_eq!(report.chunks_claimed, report.chunk_count);
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_early_termination_skips_most_chunks() {
        let coord = coordinator("0123456789", 8, 4, 1_000);
        assert_eq!(coord.chunk_count(), 100_000);

        let report = coord.run(&|candidate: &str| candidate == "00002500").unwrap();
        assert_eq!(report.candidate(), Some("00002500"));
        // Chunks up to the match, plus at most a few in flight on other workers
        assert!(report.chunks_claimed < report.chunk_count / 10);
        assert!(report.attempted < report.total / 10);
    }

    #[test]
    fn test_progress_is_monotonic_and_final() {
        let coord = {
            let space = KeySpace::new(Alphabet::new("abcdef").unwrap(), 6).unwrap();
            let config = SearchConfig::default()
                .with_workers(4)
                .with_chunk_size(64)
                .with_progress_interval(Duration::from_millis(1));
            SearchCoordinator::new(space, config).unwrap()
        };
        let samples = Mutex::new(Vec::new());

        let report = coord
            .run_with_progress(
                &|candidate: &str| candidate.bytes().map(u64::from).sum::<u64>() == 0,
                |completed, total| samples.lock().unwrap().push((completed, total)),
            )
            .unwrap();

        let samples = samples.into_inner().unwrap();
        assert!(!samples.is_empty());
        assert!(samples.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(samples.iter().all(|&(completed, total)| completed <= total && total == 46_656));
        assert_eq!(samples.last().unwrap().0, report.attempted);
        assert_eq!(report.attempted, 46_656);
    }

    #[test]
    fn test_overflowing_space_spawns_no_workers() {
        let calls = AtomicU64::new(0);
        let oracle = |_: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        };

        let err = search(Alphabet::new(DEFAULT_ALPHABET).unwrap(), 11, &oracle, 4).unwrap_err();
        assert!(matches!(err, SearchError::KeyspaceOverflow { base: 62, length: 11 }));
        assert!(err.is_configuration());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_worker_count_rejected() {
        let err = search(Alphabet::new("ab").unwrap(), 2, &|_: &str| true, 0).unwrap_err();
        assert!(matches!(err, SearchError::InvalidWorkerCount));
    }

    struct BrokenOracle {
        fail_at: String,
        calls: AtomicU64,
    }

    impl Oracle for BrokenOracle {
        fn validate(&self, candidate: &str) -> Result<bool, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if candidate == self.fail_at {
                Err(OracleError::unavailable("target.zip", "vanished"))
            } else {
                Ok(false)
            }
        }
    }

    #[test]
    fn test_oracle_failure_aborts_run() {
        let coord = coordinator("0123456789", 7, 4, 100);
        let oracle = BrokenOracle {
            fail_at: "0000150".to_string(),
            calls: AtomicU64::new(0),
        };

        let err = coord.run(&oracle).unwrap_err();
        assert!(matches!(err, SearchError::Oracle(OracleError::Unavailable { .. })));
        assert_eq!(err.category(), "resource access");
        assert!(oracle.calls.load(Ordering::SeqCst) < coord.space().total() / 10);
    }

    #[test]
    fn test_search_function_with_trait_object() {
        let oracle: &dyn Oracle = &|candidate: &str| candidate == "ba";
        let found = search(Alphabet::new("ab").unwrap(), 2, oracle, 2).unwrap();
        assert_eq!(found.as_deref(), Some("ba"));

        let none = search(Alphabet::new("ab").unwrap(), 2, &|_: &str| false, 2).unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_single_worker_and_oversized_chunks() {
        let coord = coordinator("ab", 3, 1, 1_000_000);
        assert_eq!(coord.workers(), 1);
        let report = coord.run(&|candidate: &str| candidate == "bab").unwrap();
        assert_eq!(report.candidate(), Some("bab"));
        assert_eq!(report.chunks_claimed, 1);
    }
}
