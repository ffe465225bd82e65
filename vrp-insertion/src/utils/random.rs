#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use std::sync::Mutex;

/// Provides random generators for shuffling and sampling.
pub trait Random: Send + Sync {
    /// Returns a new generator. Repeatable sources return generators of the same sequence
    /// for the same order of calls.
    fn get_rng(&self) -> RandomGen;
}

/// Specifies underlying random generator type.
pub type RandomGen = SmallRng;

/// A default random implementation. Uses thread local entropy unless created as repeatable.
#[derive(Default)]
pub struct DefaultRandom {
    seeded: Option<Mutex<SmallRng>>,
}

impl DefaultRandom {
    /// Creates an instance which produces the same sequence of generators for the same seed.
    pub fn new_repeatable(seed: u64) -> Self {
        Self { seeded: Some(Mutex::new(SmallRng::seed_from_u64(seed))) }
    }
}

impl Random for DefaultRandom {
    fn get_rng(&self) -> RandomGen {
        match &self.seeded {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                SmallRng::seed_from_u64(rng.next_u64())
            }
            None => SmallRng::seed_from_u64(thread_rng().next_u64()),
        }
    }
}
