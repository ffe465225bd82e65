#[cfg(test)]
#[path = "../../../tests/unit/solver/ruin/radial_job_removal_test.rs"]
mod radial_job_removal_test;

use super::*;
use crate::models::Problem;
use crate::solver::RuinListeners;
use crate::utils::Environment;
use rand::prelude::*;
use std::sync::Arc;

/// A ruin strategy which removes jobs closest to a seed job, so that spatially clustered jobs can
/// be re-inserted jointly.
pub struct RadialJobRemoval {
    problem: Arc<Problem>,
    environment: Arc<Environment>,
    listeners: RuinListeners,
    neighbourhood: Arc<JobNeighbourhood>,
    fraction: f64,
}

impl RadialJobRemoval {
    /// Creates a new instance of `RadialJobRemoval` which removes `ceil(fraction * total jobs)` jobs.
    pub fn new(
        problem: Arc<Problem>,
        environment: Arc<Environment>,
        neighbourhood: Arc<JobNeighbourhood>,
        fraction: f64,
    ) -> Self {
        let listeners = RuinListeners::new(problem.as_ref());
        Self::new_with_listeners(problem, environment, listeners, neighbourhood, fraction)
    }

    /// Creates a new instance of `RadialJobRemoval` with given listeners.
    pub fn new_with_listeners(
        problem: Arc<Problem>,
        environment: Arc<Environment>,
        listeners: RuinListeners,
        neighbourhood: Arc<JobNeighbourhood>,
        fraction: f64,
    ) -> Self {
        Self { problem, environment, listeners, neighbourhood, fraction }
    }

    fn closest_assigned(&self, solution_ctx: &SolutionContext, seed: &Job, count: usize) -> Vec<Job> {
        self.neighbourhood
            .neighbours(seed)
            .filter(|(job, _)| solution_ctx.find_route_index(job).is_some())
            .take(count)
            .map(|(job, _)| job.clone())
            .collect()
    }
}

impl Ruin for RadialJobRemoval {
    fn ruin(&self, solution_ctx: &mut SolutionContext) -> Vec<Job> {
        let count = get_removal_count(self.fraction, self.problem.jobs.size());
        let mut assigned = solution_ctx.assigned_jobs().cloned().collect::<Vec<_>>();
        assigned.sort_by_key(|job| self.problem.jobs.index_of(job));

        let Some(seed) = assigned.choose(&mut self.environment.random.get_rng()).cloned() else {
            return vec![];
        };

        if count == 0 {
            return vec![];
        }

        let neighbours = self.closest_assigned(solution_ctx, &seed, count - 1);
        let jobs = std::iter::once(seed).chain(neighbours).collect::<Vec<_>>();

        remove_jobs(&self.listeners, solution_ctx, jobs)
    }

    fn ruin_with_seed(&self, solution_ctx: &mut SolutionContext, seed: &Job, count: usize) -> Vec<Job> {
        let jobs = self.closest_assigned(solution_ctx, seed, count);

        remove_jobs(&self.listeners, solution_ctx, jobs)
    }
}
