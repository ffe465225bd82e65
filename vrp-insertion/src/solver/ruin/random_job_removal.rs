#[cfg(test)]
#[path = "../../../tests/unit/solver/ruin/random_job_removal_test.rs"]
mod random_job_removal_test;

use super::*;
use crate::models::Problem;
use crate::solver::RuinListeners;
use crate::utils::Environment;
use rand::prelude::*;
use std::sync::Arc;

/// A ruin strategy which removes uniformly sampled jobs. Jobs are sampled from the whole problem,
/// so sampled jobs which are not assigned are skipped.
pub struct RandomJobRemoval {
    problem: Arc<Problem>,
    environment: Arc<Environment>,
    listeners: RuinListeners,
    fraction: f64,
}

impl RandomJobRemoval {
    /// Creates a new instance of `RandomJobRemoval` which samples `ceil(fraction * total jobs)` jobs.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>, fraction: f64) -> Self {
        let listeners = RuinListeners::new(problem.as_ref());
        Self::new_with_listeners(problem, environment, listeners, fraction)
    }

    /// Creates a new instance of `RandomJobRemoval` with given listeners.
    pub fn new_with_listeners(
        problem: Arc<Problem>,
        environment: Arc<Environment>,
        listeners: RuinListeners,
        fraction: f64,
    ) -> Self {
        Self { problem, environment, listeners, fraction }
    }

    fn sample(&self, count: usize, excluded: Option<&Job>) -> Vec<Job> {
        let candidates = self
            .problem
            .jobs
            .all()
            .iter()
            .filter(|job| excluded.is_none_or(|excluded| *job != excluded))
            .collect::<Vec<_>>();

        candidates.choose_multiple(&mut self.environment.random.get_rng(), count).map(|&job| job.clone()).collect()
    }
}

impl Ruin for RandomJobRemoval {
    fn ruin(&self, solution_ctx: &mut SolutionContext) -> Vec<Job> {
        let count = get_removal_count(self.fraction, self.problem.jobs.size());
        let jobs = self.sample(count, None);

        remove_jobs(&self.listeners, solution_ctx, jobs)
    }

    fn ruin_with_seed(&self, solution_ctx: &mut SolutionContext, seed: &Job, count: usize) -> Vec<Job> {
        let jobs = self.sample(count, Some(seed));

        remove_jobs(&self.listeners, solution_ctx, jobs)
    }
}
