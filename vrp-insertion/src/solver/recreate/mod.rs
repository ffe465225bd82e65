//! The recreate module contains insertion strategies which place unassigned jobs into routes.

#[cfg(test)]
#[path = "../../../tests/unit/solver/recreate/recreate_test.rs"]
mod recreate_test;

use crate::construction::heuristics::*;
use crate::models::problem::Job;
use crate::models::Problem;
use crate::solver::InsertionListeners;
use crate::utils::{compare_shared, Environment, GenericResult};
use std::sync::Arc;

mod recreate_with_best;
pub use self::recreate_with_best::BestInsertion;

mod recreate_with_concurrent;
pub use self::recreate_with_concurrent::ConcurrentBestInsertion;

mod recreate_with_regret;
pub use self::recreate_with_regret::*;

/// A trait which specifies logic to insert unassigned jobs into routes of a solution.
pub trait Recreate: Send + Sync {
    /// Inserts given jobs into the solution. Fails if a job cannot be assigned and unassigned jobs
    /// are not allowed.
    fn insert_jobs(&self, solution_ctx: &mut SolutionContext, jobs: Vec<Job>) -> GenericResult<()>;
}

/// Specifies insertion strategy settings.
#[derive(Clone, Debug)]
pub struct InsertionConfig {
    /// A calculator used for services.
    pub calculator: CalculatorKind,
    /// Whether alternative vehicles are tried for existing routes.
    pub vehicle_switch: bool,
    /// Whether jobs which cannot be assigned are left unassigned instead of failing the run.
    pub allow_unassigned: bool,
    /// Amount of route batches evaluated concurrently.
    pub batches: usize,
    /// Amount of worker threads used for concurrent evaluation.
    pub threads: usize,
}

impl Default for InsertionConfig {
    fn default() -> Self {
        Self {
            calculator: CalculatorKind::Local,
            vehicle_switch: true,
            allow_unassigned: false,
            batches: 4,
            threads: 4,
        }
    }
}

impl InsertionConfig {
    /// Sets calculator kind.
    pub fn with_calculator(mut self, calculator: CalculatorKind) -> Self {
        self.calculator = calculator;
        self
    }

    /// Enables or disables vehicle switching.
    pub fn with_vehicle_switch(mut self, vehicle_switch: bool) -> Self {
        self.vehicle_switch = vehicle_switch;
        self
    }

    /// Allows or forbids unassigned jobs.
    pub fn with_allow_unassigned(mut self, allow_unassigned: bool) -> Self {
        self.allow_unassigned = allow_unassigned;
        self
    }

    /// Sets amount of concurrently evaluated route batches.
    pub fn with_batches(mut self, batches: usize) -> Self {
        self.batches = batches.max(1);
        self
    }

    /// Sets amount of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

/// Keeps logic shared by insertion strategies: applies insertion results, fires lifecycle events,
/// handles failures and logs run summary.
pub(crate) struct InsertionHeuristic {
    pub evaluator: InsertionEvaluator,
    pub listeners: InsertionListeners,
    pub environment: Arc<Environment>,
    allow_unassigned: bool,
    name: &'static str,
}

impl InsertionHeuristic {
    pub fn new(
        name: &'static str,
        problem: &Problem,
        environment: Arc<Environment>,
        listeners: InsertionListeners,
        config: &InsertionConfig,
    ) -> Self {
        Self {
            evaluator: InsertionEvaluator::new(problem, config.calculator, config.vehicle_switch),
            listeners,
            environment,
            allow_unassigned: config.allow_unassigned,
            name,
        }
    }

    pub fn start(&self, solution_ctx: &mut SolutionContext, jobs: &[Job]) {
        self.listeners.insertion_starts(solution_ctx, jobs);
    }

    /// Applies successful insertion to the solution.
    pub fn apply(&self, solution_ctx: &mut SolutionContext, success: InsertionSuccess) {
        let route_idx = match success.route {
            Some(route_id) => solution_ctx
                .route_index(route_id)
                .unwrap_or_else(|| panic!("insertion result refers to unknown route {route_id:?}")),
            None => solution_ctx.create_route(success.actor.clone()),
        };

        self.listeners.before_insertion(solution_ctx, route_idx, &success);

        let route_ctx = &mut solution_ctx.routes[route_idx];
        if !compare_shared(&route_ctx.route().actor, &success.actor) {
            route_ctx.switch_actor(success.actor.clone());
        }

        let route = route_ctx.route_mut();
        success.activities.into_iter().enumerate().for_each(|(offset, (activity, leg_idx))| {
            route.tour.insert_at(activity, leg_idx + 1 + offset);
        });

        solution_ctx.unassigned.remove(&success.job);
        self.listeners.job_inserted(solution_ctx, route_idx, &success.job);
    }

    /// Handles a job which cannot be inserted anywhere.
    pub fn fail(&self, solution_ctx: &mut SolutionContext, job: &Job, failure: &InsertionFailure) -> GenericResult<()> {
        if !self.allow_unassigned {
            return Err(format!(
                "{}: cannot insert job '{}', last violated constraint code: {}",
                self.name,
                job.id(),
                failure.constraint
            )
            .into());
        }

        (self.environment.logger)(&format!(
            "{}: job '{}' is unassigned, constraint code: {}",
            self.name,
            job.id(),
            failure.constraint
        ));
        solution_ctx.unassigned.insert(job.clone(), failure.constraint);

        Ok(())
    }

    pub fn finish(&self, solution_ctx: &mut SolutionContext, total: usize) {
        self.listeners.insertion_ends(solution_ctx);

        let unassigned = solution_ctx.unassigned.len();
        (self.environment.logger)(&format!(
            "{}: processed {} jobs, routes: {}, unassigned: {}",
            self.name,
            total,
            solution_ctx.routes.len(),
            unassigned
        ));
    }

    /// Applies evaluation result: either inserts the job or handles its failure.
    pub fn accept(&self, solution_ctx: &mut SolutionContext, job: &Job, result: InsertionResult) -> GenericResult<()> {
        match result {
            InsertionResult::Success(success) => {
                self.apply(solution_ctx, success);
                Ok(())
            }
            InsertionResult::Failure(failure) => self.fail(solution_ctx, job, &failure),
        }
    }
}
