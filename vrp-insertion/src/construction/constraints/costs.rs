#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/costs_test.rs"]
mod costs_test;

use crate::construction::constraints::SoftRouteConstraint;
use crate::construction::heuristics::InsertionContext;
use crate::models::common::Cost;

/// Adds a fixed cost of the actor when a new route is opened and the difference of fixed costs
/// when the route actor is switched.
#[derive(Default)]
pub struct FixedCostConstraint {}

impl SoftRouteConstraint for FixedCostConstraint {
    fn estimate_job(&self, ctx: &InsertionContext) -> Cost {
        let route = ctx.route_ctx.route();

        if !route.tour.has_jobs() {
            ctx.actor.fixed_cost()
        } else if ctx.is_actor_switched() {
            ctx.actor.fixed_cost() - route.actor.fixed_cost()
        } else {
            0.
        }
    }
}
