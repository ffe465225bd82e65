use crate::utils::{DefaultRandom, GenericResult, Random, ThreadPool};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the engine.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random>,

    /// Keeps data parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(random: Arc<dyn Random>, parallelism: Parallelism, logger: InfoLogger) -> Self {
        Self { random, parallelism, logger }
    }

    /// Creates an instance of `Environment` using seeded random and default logger.
    pub fn new_repeatable(seed: u64) -> Self {
        Self { random: Arc::new(DefaultRandom::new_repeatable(seed)), ..Self::default() }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(
            Arc::new(DefaultRandom::default()),
            Parallelism::default(),
            Arc::new(|msg: &str| println!("{msg}")),
        )
    }
}

/// Specifies data parallelism settings.
#[derive(Clone, Debug)]
pub struct Parallelism {
    available_cpus: usize,
}

impl Parallelism {
    /// Creates an instance of `Parallelism` limited by given amount of cpus.
    pub fn new(available_cpus: usize) -> Self {
        Self { available_cpus: available_cpus.max(1) }
    }

    /// Amount of total available CPUs.
    pub fn available_cpus(&self) -> usize {
        self.available_cpus
    }

    /// Creates a thread pool with at most `threads` workers, bounded by available cpus.
    pub fn create_pool(&self, threads: usize) -> GenericResult<ThreadPool> {
        ThreadPool::new(threads.clamp(1, self.available_cpus))
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(get_cpus())
    }
}

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}
