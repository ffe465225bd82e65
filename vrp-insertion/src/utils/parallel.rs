use rayon::prelude::*;
use rayon::{ThreadPool as RayonThreadPool, ThreadPoolBuilder};

use crate::utils::GenericResult;

/// Represents a thread pool wrapper.
pub struct ThreadPool {
    inner: RayonThreadPool,
}

impl ThreadPool {
    /// Creates a new instance of `ThreadPool` with given amount of worker threads.
    pub fn new(num_threads: usize) -> GenericResult<Self> {
        let inner = ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .build()
            .map_err(|err| format!("cannot build a thread pool: {err}"))?;

        Ok(Self { inner })
    }

    /// Executes given operation on thread pool.
    pub fn execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }

    /// Returns amount of worker threads.
    pub fn num_threads(&self) -> usize {
        self.inner.current_num_threads()
    }
}

/// Maps collection and collects results into vector in parallel.
pub fn parallel_collect<T, F, R>(source: &[T], map_op: F) -> Vec<R>
where
    T: Send + Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    source.par_iter().map(map_op).collect()
}
