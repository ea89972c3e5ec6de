//! Run-time configuration for a search.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::parallel::WorkerPool;

pub const DEFAULT_CHUNK_SIZE: u64 = 1000;
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Configuration for one search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Exact number of worker threads. Overrides the core-based calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Upper bound on worker threads when calculated (0 = no limit)
    pub max_threads: usize,
    /// Percentage of CPU cores to use when calculated (1-100)
    pub thread_percentage: u8,
    /// Number of consecutive indices a worker claims at once
    pub chunk_size: u64,
    /// How often the progress observer reports
    #[serde(with = "millis")]
    pub progress_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: None,
            max_threads: 0,
            thread_percentage: 100,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SearchConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.chunk_size == 0 {
            return Err(SearchError::InvalidChunkSize);
        }
        if self.workers == Some(0) {
            return Err(SearchError::InvalidWorkerCount);
        }
        // A zero timeout would turn the progress observer into a busy loop
        if self.progress_interval.is_zero() {
            return Err(SearchError::InvalidProgressInterval);
        }
        Ok(())
    }

    /// Worker threads to start for a workload of `chunk_count` chunks.
    ///
    /// Never more threads than chunks, never fewer than one.
    pub fn resolve_workers(&self, chunk_count: u64) -> usize {
        let wanted = self.workers.unwrap_or_else(|| {
            WorkerPool::calculate_optimal_workers(self.max_threads, self.thread_percentage)
        });
        let cap = usize::try_from(chunk_count).unwrap_or(usize::MAX);
        wanted.min(cap).max(1)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
