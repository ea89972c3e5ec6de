use crossbeam::channel::{Receiver, bounded};

use crate::error::SearchError;

/// Fixed-size pool of scoped worker threads, created and joined once per run.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
}

const THREAD_PREFIX: &str = "keysweep-worker";

/// Calls the cancel hook if the owning thread unwinds, so the remaining
/// workers stop instead of finishing the whole workload.
struct CancelOnPanic<'a, C: Fn()>(&'a C);

impl<C: Fn()> Drop for CancelOnPanic<'_, C> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            (self.0)();
        }
    }
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `worker(worker_id)` on every pool thread and block until all return.
    ///
    /// `monitor`, when given, runs on one extra thread and receives a channel
    /// that disconnects once every worker has been joined. `cancel` is invoked
    /// when a worker cannot be spawned or panics; it must make the running
    /// workers return promptly.
    pub fn run<W, M, C>(&self, worker: W, monitor: Option<M>, cancel: C) -> Result<(), SearchError>
    where
        W: Fn(usize) + Sync,
        M: FnOnce(Receiver<()>) + Send,
        C: Fn() + Sync,
    {
        let (done_tx, done_rx) = bounded::<()>(0);
        let worker = &worker;
        let cancel = &cancel;

        crossbeam::thread::scope(|s| -> Result<(), SearchError> {
            let monitor = match monitor {
                Some(monitor) => Some(
                    s.builder()
                        .name(format!("{THREAD_PREFIX}-progress"))
                        .spawn(move |_| monitor(done_rx))
                        .map_err(SearchError::WorkerSpawn)?,
                ),
                None => None,
            };

            let mut handles = Vec::with_capacity(self.workers);
            let mut spawn_error = None;

            for worker_id in 0..self.workers {
                let spawned = s
                    .builder()
                    .name(format!("{THREAD_PREFIX}-{worker_id}"))
                    .spawn(move |_| {
                        let _guard = CancelOnPanic(cancel);
                        worker(worker_id)
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        tracing::error!("Could not spawn worker {}: {}", worker_id, e);
                        cancel();
                        spawn_error = Some(e);
                        break;
                    }
                }
            }

            let mut panicked = false;
            for handle in handles {
                panicked |= handle.join().is_err();
            }

            // Disconnects the monitor's receiver
            drop(done_tx);
            if let Some(handle) = monitor {
                panicked |= handle.join().is_err();
            }

            if let Some(e) = spawn_error {
                return Err(SearchError::WorkerSpawn(e));
            }
            if panicked {
                return Err(SearchError::WorkerPanicked);
            }
            Ok(())
        })
        .map_err(|_| SearchError::WorkerPanicked)?
    }

    /// Calculate maximum workers from available cores and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// # Examples
    /// ```rust
    /// use keysweep::parallel::WorkerPool;
    ///
    /// let workers = WorkerPool::calculate_optimal_workers(0, 100);
    /// assert!(workers >= 1);
    ///
    /// let workers = WorkerPool::calculate_optimal_workers(2, 100);
    /// assert!(workers <= 2);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means no explicit limit
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}
