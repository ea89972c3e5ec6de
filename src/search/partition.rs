use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SearchError;

/// Hands out consecutive index ranges to workers on demand.
///
/// Claims are made with a single atomic read-modify-write on the cursor, so
/// no two callers ever receive overlapping ranges, and the union of all
/// claims is exactly `[0, total)`. The cursor stops at `total`; repeated
/// claims after exhaustion cannot overflow it.
#[derive(Debug)]
pub struct WorkPartitioner {
    cursor: AtomicU64,
    claimed: AtomicU64,
    total: u64,
    chunk_size: u64,
}

impl WorkPartitioner {
    pub fn new(total: u64, chunk_size: u64) -> Result<Self, SearchError> {
        if chunk_size == 0 {
            return Err(SearchError::InvalidChunkSize);
        }
        Ok(Self {
            cursor: AtomicU64::new(0),
            claimed: AtomicU64::new(0),
            total,
            chunk_size,
        })
    }

    pub fn claim_next(&self) -> Option<Range<u64>> {
        let start = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cursor| {
                (cursor < self.total).then(|| cursor + self.step_from(cursor))
            })
            .ok()?;

        self.claimed.fetch_add(1, Ordering::Relaxed);
        Some(start..start + self.step_from(start))
    }

    fn step_from(&self, cursor: u64) -> u64 {
        self.chunk_size.min(self.total - cursor)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Chunks needed to cover the whole index space
    pub fn chunk_count(&self) -> u64 {
        self.total.div_ceil(self.chunk_size)
    }

    pub fn chunks_claimed(&self) -> u64 {
        self.claimed.load(Ordering::Relaxed)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.load(Ordering::Acquire) >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn claim_all_concurrently(total: u64, chunk_size: u64, workers: usize) -> Vec<Range<u64>> {
        let partitioner = WorkPartitioner::new(total, chunk_size).unwrap();
        let claims = Mutex::new(Vec::new());

        std::thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| {
                    let mut local = Vec::new();
                    while let Some(range) = partitioner.claim_next() {
                        local.push(range);
                    }
                    claims.lock().unwrap().extend(local);
                });
            }
        });

        assert!(partitioner.is_exhausted());
        assert_eq!(partitioner.chunks_claimed(), partitioner.chunk_count());

        let mut claims = claims.into_inner().unwrap();
        claims.sort_by_key(|range| range.start);
        claims
    }

    #[test]
    fn test_sequential_claims() {
        let partitioner = WorkPartitioner::new(25, 10).unwrap();
        assert_eq!(partitioner.claim_next(), Some(0..10));
        assert_eq!(partitioner.claim_next(), Some(10..20));
        assert_eq!(partitioner.claim_next(), Some(20..25));
        assert_eq!(partitioner.claim_next(), None);
        assert_eq!(partitioner.claim_next(), None);
        assert_eq!(partitioner.chunks_claimed(), 3);
    }

    #[test]
    fn test_concurrent_claims_partition_the_space() {
        for (total, chunk_size, workers) in [
            (1, 1, 4),
            (7, 3, 2),
            (1_000, 1, 8),
            (10_007, 64, 8),
            (100_000, 1_000, 16),
            (5, 1_000, 4),
        ] {
            let claims = claim_all_concurrently(total, chunk_size, workers);

            let mut expected_start = 0;
            for range in &claims {
                assert_eq!(range.start, expected_start, "gap or overlap at {range:?}");
                assert!(range.end > range.start);
                assert!(range.end - range.start <= chunk_size);
                expected_start = range.end;
            }
            assert_eq!(expected_start, total);
        }
    }

    #[test]
    fn test_empty_space_yields_nothing() {
        let partitioner = WorkPartitioner::new(0, 10).unwrap();
        assert_eq!(partitioner.claim_next(), None);
        assert_eq!(partitioner.chunk_count(), 0);
    }

    #[test]
    fn test_cursor_never_overflows_near_max() {
        let partitioner = WorkPartitioner::new(u64::MAX, u64::MAX / 2).unwrap();
        assert_eq!(partitioner.claim_next(), Some(0..u64::MAX / 2));
        assert_eq!(partitioner.claim_next(), Some(u64::MAX / 2..u64::MAX - 1));
        assert_eq!(partitioner.claim_next(), Some(u64::MAX - 1..u64::MAX));
        assert_eq!(partitioner.claim_next(), None);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            WorkPartitioner::new(10, 0),
            Err(SearchError::InvalidChunkSize)
        ));
    }
}
