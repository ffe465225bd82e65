#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/pipeline_test.rs"]
mod pipeline_test;

use crate::construction::heuristics::{ActivityContext, InsertionContext};
use crate::models::common::Cost;
use std::sync::Arc;

/// Specifies result of hard activity constraint check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConstraintStatus {
    /// Position is feasible.
    Fulfilled,
    /// Position is infeasible, but next positions can still be feasible.
    Rejected(i32),
    /// Position is infeasible and no later position in the forward scan can be feasible.
    RejectedPrune(i32),
}

impl ConstraintStatus {
    /// Returns true if status is fulfilled.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, ConstraintStatus::Fulfilled)
    }

    /// Returns violation code, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            ConstraintStatus::Fulfilled => None,
            ConstraintStatus::Rejected(code) | ConstraintStatus::RejectedPrune(code) => Some(*code),
        }
    }
}

/// Specifies result of hard route constraint check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteConstraintViolation {
    /// Violation code.
    pub code: i32,
}

/// Specifies hard constraint which operates on route level.
pub trait HardRouteConstraint: Send + Sync {
    /// Returns violation if job cannot be served by candidate actor in the route.
    fn evaluate_job(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation>;
}

/// Specifies hard constraint which operates on activity level.
pub trait HardActivityConstraint: Send + Sync {
    /// Evaluates insertion of target activity between previous and next ones.
    fn evaluate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ConstraintStatus;
}

/// Specifies soft constraint which operates on route level.
pub trait SoftRouteConstraint: Send + Sync {
    /// Returns extra cost of serving job by candidate actor in the route.
    fn estimate_job(&self, ctx: &InsertionContext) -> Cost;
}

/// Provides the way to work with multiple constraints.
#[derive(Default)]
pub struct ConstraintPipeline {
    hard_route_constraints: Vec<Arc<dyn HardRouteConstraint>>,
    hard_activity_constraints: Vec<Arc<dyn HardActivityConstraint>>,
    soft_route_constraints: Vec<Arc<dyn SoftRouteConstraint>>,
}

impl ConstraintPipeline {
    /// Adds hard route constraint to the end of evaluation order.
    pub fn add_hard_route(&mut self, constraint: Arc<dyn HardRouteConstraint>) -> &mut Self {
        self.hard_route_constraints.push(constraint);
        self
    }

    /// Adds hard activity constraint to the end of evaluation order.
    pub fn add_hard_activity(&mut self, constraint: Arc<dyn HardActivityConstraint>) -> &mut Self {
        self.hard_activity_constraints.push(constraint);
        self
    }

    /// Adds soft route constraint.
    pub fn add_soft_route(&mut self, constraint: Arc<dyn SoftRouteConstraint>) -> &mut Self {
        self.soft_route_constraints.push(constraint);
        self
    }

    /// Checks whether all hard route constraints are fulfilled.
    /// Returns result of first failed constraint or empty value.
    pub fn evaluate_hard_route(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation> {
        self.hard_route_constraints.iter().find_map(|c| c.evaluate_job(ctx))
    }

    /// Checks whether all hard activity constraints are fulfilled.
    /// Returns status of the first failed constraint or fulfilled.
    pub fn evaluate_hard_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ConstraintStatus {
        self.hard_activity_constraints
            .iter()
            .map(|c| c.evaluate_activity(ctx, activity_ctx))
            .find(|status| !status.is_fulfilled())
            .unwrap_or(ConstraintStatus::Fulfilled)
    }

    /// Aggregates costs of soft route constraints.
    pub fn evaluate_soft_route(&self, ctx: &InsertionContext) -> Cost {
        self.soft_route_constraints.iter().map(|c| c.estimate_job(ctx)).sum()
    }
}
