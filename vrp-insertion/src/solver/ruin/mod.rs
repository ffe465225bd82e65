//! The ruin module contains strategies which remove jobs from routes of an existing solution.
//!
//! After a ruin, affected routes are re-traversed by listeners before any further evaluation.

use crate::construction::heuristics::SolutionContext;
use crate::models::problem::Job;
use crate::solver::RuinListeners;

mod job_neighbourhood;
pub use self::job_neighbourhood::JobNeighbourhood;

mod random_job_removal;
pub use self::random_job_removal::RandomJobRemoval;

mod radial_job_removal;
pub use self::radial_job_removal::RadialJobRemoval;

/// A trait which specifies logic to remove jobs from a solution.
pub trait Ruin: Send + Sync {
    /// Removes jobs from routes and returns them.
    fn ruin(&self, solution_ctx: &mut SolutionContext) -> Vec<Job>;

    /// Removes `count` jobs related to the seed job and returns them.
    fn ruin_with_seed(&self, solution_ctx: &mut SolutionContext, seed: &Job, count: usize) -> Vec<Job>;
}

/// Returns amount of jobs to be removed: a fraction of all problem jobs rounded up.
fn get_removal_count(fraction: f64, total: usize) -> usize {
    ((fraction.clamp(0., 1.) * total as f64).ceil() as usize).min(total)
}

/// Removes given jobs from routes which serve them, firing ruin events. Returns removed jobs.
fn remove_jobs(
    listeners: &RuinListeners,
    solution_ctx: &mut SolutionContext,
    jobs: impl IntoIterator<Item = Job>,
) -> Vec<Job> {
    listeners.ruin_starts(solution_ctx);

    let removed = jobs
        .into_iter()
        .filter_map(|job| {
            let route_idx = solution_ctx.find_route_index(&job)?;
            solution_ctx.routes[route_idx].route_mut().tour.remove(&job);
            listeners.job_removed(solution_ctx, route_idx, &job);

            Some(job)
        })
        .collect::<Vec<_>>();

    listeners.ruin_ends(solution_ctx, removed.as_slice());

    removed
}
