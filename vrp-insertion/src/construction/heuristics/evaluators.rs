#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/evaluators_test.rs"]
mod evaluators_test;

use crate::construction::constraints::ConstraintPipeline;
use crate::construction::heuristics::*;
use crate::models::common::Cost;
use crate::models::problem::{Actor, Job};
use crate::models::Problem;
use crate::utils::compare_floats;
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies which calculator is used to insert services.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CalculatorKind {
    /// Evaluates immediate neighbours of every position.
    #[default]
    Local,
    /// Approximates positions with a forward looking path and re-scores the best ones exactly.
    RouteLevel {
        /// Amount of activities after the successor included into approximation.
        forward_looking: usize,
        /// Amount of best approximations which are re-scored exactly.
        memory_size: usize,
    },
}

/// Evaluates job insertion into existing routes and new routes, trying alternative vehicles.
pub struct InsertionEvaluator {
    constraint: Arc<ConstraintPipeline>,
    service: Box<dyn JobInsertionCalculator>,
    shipment: Box<dyn JobInsertionCalculator>,
    vehicle_switch: bool,
}

impl InsertionEvaluator {
    /// Creates a new instance of `InsertionEvaluator`.
    pub fn new(problem: &Problem, kind: CalculatorKind, vehicle_switch: bool) -> Self {
        let (constraint, transport, activity) =
            (problem.constraint.clone(), problem.transport.clone(), problem.activity.clone());
        let neighbourhood = problem.neighbourhood.clone();

        let service: Box<dyn JobInsertionCalculator> = match kind {
            CalculatorKind::Local => Box::new(LocalInsertionCalculator::new(
                constraint.clone(),
                transport.clone(),
                activity.clone(),
                neighbourhood.clone(),
            )),
            CalculatorKind::RouteLevel { forward_looking, memory_size } => {
                Box::new(RouteLevelInsertionCalculator::new(
                    constraint.clone(),
                    transport.clone(),
                    activity.clone(),
                    neighbourhood.clone(),
                    forward_looking,
                    memory_size,
                ))
            }
        };

        let shipment =
            Box::new(ShipmentInsertionCalculator::new(constraint.clone(), transport, activity, neighbourhood));

        Self { constraint, service, shipment, vehicle_switch }
    }

    /// Evaluates insertion of the job into all routes of the solution and new routes, returns the cheapest one.
    pub fn evaluate_job(&self, solution_ctx: &SolutionContext, job: &Job) -> InsertionResult {
        let result = self.evaluate_routes(solution_ctx, solution_ctx.routes.as_slice(), job, None);
        let best_known = result.as_success().map(|success| success.cost);

        InsertionResult::choose_best_result(result, self.evaluate_new_routes(solution_ctx, job, best_known))
    }

    /// Evaluates insertion of the job into given routes.
    pub fn evaluate_routes(
        &self,
        solution_ctx: &SolutionContext,
        routes: &[RouteContext],
        job: &Job,
        best_known: Option<Cost>,
    ) -> InsertionResult {
        let init = InsertionResult::make_failure();

        routes.iter().fold(init, |acc, route_ctx| {
            let bound = acc.as_success().map(|success| success.cost).or(best_known);
            InsertionResult::choose_best_result(acc, self.evaluate_route(solution_ctx, route_ctx, job, bound))
        })
    }

    /// Evaluates insertion of the job into the route using its own actor and, if vehicle switch is
    /// enabled, one available actor of every other type.
    pub fn evaluate_route(
        &self,
        solution_ctx: &SolutionContext,
        route_ctx: &RouteContext,
        job: &Job,
        best_known: Option<Cost>,
    ) -> InsertionResult {
        let route_actor = route_ctx.route().actor.clone();
        let result = self.evaluate_actor(route_ctx, job, &route_actor, best_known);

        if !self.vehicle_switch {
            return result;
        }

        solution_ctx.registry.fleet.available_except(&route_actor.type_key).fold(result, |acc, actor| {
            let bound = acc.as_success().map(|success| success.cost).or(best_known);
            InsertionResult::choose_best_result(acc, self.evaluate_actor(route_ctx, job, &actor, bound))
        })
    }

    /// Evaluates insertion of the job into new routes: one per available vehicle type.
    pub fn evaluate_new_routes(
        &self,
        solution_ctx: &SolutionContext,
        job: &Job,
        best_known: Option<Cost>,
    ) -> InsertionResult {
        solution_ctx.registry.next().fold(InsertionResult::make_failure(), |acc, (actor, route_ctx)| {
            let bound = acc.as_success().map(|success| success.cost).or(best_known);
            InsertionResult::choose_best_result(acc, self.evaluate_actor(route_ctx, job, &actor, bound))
        })
    }

    /// Evaluates insertion of the job without cost bound: one result per existing route and one per
    /// new route of every available vehicle type.
    pub fn evaluate_options(&self, solution_ctx: &SolutionContext, job: &Job) -> Vec<InsertionResult> {
        let new_routes = solution_ctx
            .registry
            .next()
            .map(|(actor, route_ctx)| self.evaluate_actor(route_ctx, job, &actor, None));

        solution_ctx
            .routes
            .iter()
            .map(|route_ctx| self.evaluate_route(solution_ctx, route_ctx, job, None))
            .chain(new_routes)
            .collect()
    }

    fn evaluate_actor(
        &self,
        route_ctx: &RouteContext,
        job: &Job,
        actor: &Arc<Actor>,
        best_known: Option<Cost>,
    ) -> InsertionResult {
        let ctx = InsertionContext::new(route_ctx, job, actor);

        if let Some(violation) = self.constraint.evaluate_hard_route(&ctx) {
            return InsertionResult::make_failure_with_code(violation.code, true, Some(job.clone()));
        }

        let route_cost = self.constraint.evaluate_soft_route(&ctx);
        if best_known.is_some_and(|best_known| compare_floats(route_cost, best_known) != Ordering::Less) {
            return InsertionResult::make_failure();
        }

        let calculator = match job {
            Job::Service(_) => self.service.as_ref(),
            Job::Shipment(_) => self.shipment.as_ref(),
        };

        match calculator.calculate(&ctx, best_known.map(|best_known| best_known - route_cost)) {
            InsertionResult::Success(mut success) => {
                success.cost += route_cost;
                InsertionResult::Success(success)
            }
            failure => failure,
        }
    }
}
