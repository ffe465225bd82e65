#[cfg(test)]
#[path = "../../tests/unit/solver/events_test.rs"]
mod events_test;

use crate::construction::heuristics::{InsertionSuccess, SolutionContext};
use crate::construction::states::StateManager;
use crate::models::problem::Job;
use crate::models::Problem;
use crate::utils::compare_shared;
use std::sync::Arc;

/// Listens to the start of insertion run.
pub trait InsertionStartsListener: Send + Sync {
    /// Called before the first job is evaluated.
    fn on_insertion_starts(&self, solution_ctx: &mut SolutionContext, jobs: &[Job]);
}

/// Listens to an insertion which is about to be applied.
pub trait BeforeInsertionListener: Send + Sync {
    /// Called before activities are inserted into the route with given index. The route actor is
    /// not yet switched to the actor of insertion success.
    fn on_before_insertion(&self, solution_ctx: &mut SolutionContext, route_idx: usize, success: &InsertionSuccess);
}

/// Listens to an applied insertion.
pub trait JobInsertedListener: Send + Sync {
    /// Called after job is inserted into the route with given index.
    fn on_job_inserted(&self, solution_ctx: &mut SolutionContext, route_idx: usize, job: &Job);
}

/// Listens to the end of insertion run.
pub trait InsertionEndsListener: Send + Sync {
    /// Called after all jobs are processed.
    fn on_insertion_ends(&self, solution_ctx: &mut SolutionContext);
}

/// Listens to ruin events.
pub trait RuinListener: Send + Sync {
    /// Called before any job is removed.
    fn on_ruin_starts(&self, _solution_ctx: &mut SolutionContext) {}

    /// Called after job is removed from the route with given index.
    fn on_job_removed(&self, _solution_ctx: &mut SolutionContext, _route_idx: usize, _job: &Job) {}

    /// Called after all jobs are removed.
    fn on_ruin_ends(&self, solution_ctx: &mut SolutionContext, removed: &[Job]);
}

/// Keeps ordered insertion listeners per event kind.
#[derive(Clone, Default)]
pub struct InsertionListeners {
    starts: Vec<Arc<dyn InsertionStartsListener>>,
    before_insertion: Vec<Arc<dyn BeforeInsertionListener>>,
    job_inserted: Vec<Arc<dyn JobInsertedListener>>,
    ends: Vec<Arc<dyn InsertionEndsListener>>,
}

impl InsertionListeners {
    /// Creates listeners which keep vehicle locks and route states consistent.
    pub fn new(problem: &Problem) -> Self {
        let locker = Arc::new(FleetLocker::default());

        let mut listeners = Self::default();
        listeners
            .add_starts(problem.states.clone())
            .add_before_insertion(locker.clone())
            .add_job_inserted(problem.states.clone())
            .add_ends(locker)
            .add_ends(problem.states.clone());

        listeners
    }

    /// Adds insertion starts listener.
    pub fn add_starts(&mut self, listener: Arc<dyn InsertionStartsListener>) -> &mut Self {
        self.starts.push(listener);
        self
    }

    /// Adds before insertion listener.
    pub fn add_before_insertion(&mut self, listener: Arc<dyn BeforeInsertionListener>) -> &mut Self {
        self.before_insertion.push(listener);
        self
    }

    /// Adds job inserted listener.
    pub fn add_job_inserted(&mut self, listener: Arc<dyn JobInsertedListener>) -> &mut Self {
        self.job_inserted.push(listener);
        self
    }

    /// Adds insertion ends listener.
    pub fn add_ends(&mut self, listener: Arc<dyn InsertionEndsListener>) -> &mut Self {
        self.ends.push(listener);
        self
    }

    pub(crate) fn insertion_starts(&self, solution_ctx: &mut SolutionContext, jobs: &[Job]) {
        self.starts.iter().for_each(|listener| listener.on_insertion_starts(solution_ctx, jobs));
    }

    pub(crate) fn before_insertion(
        &self,
        solution_ctx: &mut SolutionContext,
        route_idx: usize,
        success: &InsertionSuccess,
    ) {
        self.before_insertion
            .iter()
            .for_each(|listener| listener.on_before_insertion(solution_ctx, route_idx, success));
    }

    pub(crate) fn job_inserted(&self, solution_ctx: &mut SolutionContext, route_idx: usize, job: &Job) {
        self.job_inserted.iter().for_each(|listener| listener.on_job_inserted(solution_ctx, route_idx, job));
    }

    pub(crate) fn insertion_ends(&self, solution_ctx: &mut SolutionContext) {
        self.ends.iter().for_each(|listener| listener.on_insertion_ends(solution_ctx));
    }
}

/// Keeps ordered ruin listeners.
#[derive(Clone, Default)]
pub struct RuinListeners {
    listeners: Vec<Arc<dyn RuinListener>>,
}

impl RuinListeners {
    /// Creates listeners which keep vehicle locks and route states consistent.
    pub fn new(problem: &Problem) -> Self {
        let mut listeners = Self::default();
        listeners.add(Arc::new(FleetLocker::default())).add(problem.states.clone());

        listeners
    }

    /// Adds ruin listener.
    pub fn add(&mut self, listener: Arc<dyn RuinListener>) -> &mut Self {
        self.listeners.push(listener);
        self
    }

    pub(crate) fn ruin_starts(&self, solution_ctx: &mut SolutionContext) {
        self.listeners.iter().for_each(|listener| listener.on_ruin_starts(solution_ctx));
    }

    pub(crate) fn job_removed(&self, solution_ctx: &mut SolutionContext, route_idx: usize, job: &Job) {
        self.listeners.iter().for_each(|listener| listener.on_job_removed(solution_ctx, route_idx, job));
    }

    pub(crate) fn ruin_ends(&self, solution_ctx: &mut SolutionContext, removed: &[Job]) {
        self.listeners.iter().for_each(|listener| listener.on_ruin_ends(solution_ctx, removed));
    }
}

/// Locks actors of used routes, unlocks replaced actors and actors of routes left empty.
#[derive(Default)]
pub struct FleetLocker {}

impl BeforeInsertionListener for FleetLocker {
    fn on_before_insertion(&self, solution_ctx: &mut SolutionContext, route_idx: usize, success: &InsertionSuccess) {
        let route_actor = solution_ctx.routes[route_idx].route().actor.clone();
        let fleet = &mut solution_ctx.registry.fleet;

        if !compare_shared(&route_actor, &success.actor) {
            fleet.unlock(&route_actor);
        }

        if !fleet.is_locked(&success.actor) {
            fleet.lock(&success.actor);
        }
    }
}

impl InsertionEndsListener for FleetLocker {
    fn on_insertion_ends(&self, solution_ctx: &mut SolutionContext) {
        solution_ctx.remove_empty_routes();
    }
}

impl RuinListener for FleetLocker {
    fn on_ruin_ends(&self, solution_ctx: &mut SolutionContext, _: &[Job]) {
        solution_ctx.remove_empty_routes();
    }
}

impl InsertionStartsListener for StateManager {
    fn on_insertion_starts(&self, solution_ctx: &mut SolutionContext, _: &[Job]) {
        self.update_solution(solution_ctx);
    }
}

impl JobInsertedListener for StateManager {
    fn on_job_inserted(&self, solution_ctx: &mut SolutionContext, route_idx: usize, _: &Job) {
        if let Some(route_ctx) = solution_ctx.routes.get_mut(route_idx) {
            self.update_route(route_ctx);
        }
    }
}

impl InsertionEndsListener for StateManager {
    fn on_insertion_ends(&self, solution_ctx: &mut SolutionContext) {
        self.update_solution(solution_ctx);
    }
}

impl RuinListener for StateManager {
    fn on_ruin_ends(&self, solution_ctx: &mut SolutionContext, _: &[Job]) {
        self.update_solution(solution_ctx);
    }
}
