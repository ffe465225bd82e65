#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/capacity_test.rs"]
mod capacity_test;

use crate::construction::constraints::*;
use crate::construction::heuristics::{ActivityContext, InsertionContext};
use crate::construction::states::*;
use crate::models::problem::Job;
use crate::models::solution::ActivityKind;

/// Checks whether vehicle can handle demand of the job. Relies on load states.
pub struct CapacityConstraint {
    code: i32,
}

impl Default for CapacityConstraint {
    fn default() -> Self {
        Self { code: CAPACITY_CONSTRAINT_CODE }
    }
}

impl HardRouteConstraint for CapacityConstraint {
    fn evaluate_job(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation> {
        let capacity = ctx.actor.capacity();
        let state = ctx.route_ctx.state();

        let can_handle = state.get_max_load().unwrap_or(0) <= capacity
            && match ctx.job {
                Job::Service(service) if service.demand < 0 => {
                    state.get_load_at_beginning().unwrap_or(0) - service.demand <= capacity
                }
                Job::Service(service) => state.get_load_at_end().unwrap_or(0) + service.demand <= capacity,
                Job::Shipment(shipment) => shipment.demand <= capacity,
            };

        if can_handle { None } else { Some(RouteConstraintViolation { code: self.code }) }
    }
}

impl HardActivityConstraint for CapacityConstraint {
    fn evaluate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ConstraintStatus {
        let capacity = ctx.actor.capacity();
        let state = ctx.route_ctx.state();
        let prev_idx = activity_ctx.index;
        let demand = activity_ctx.target.demand;

        match &activity_ctx.target.kind {
            ActivityKind::Service(_) if demand > 0 => {
                if state.get_future_max_load_at(prev_idx).unwrap_or(0) + demand > capacity {
                    return ConstraintStatus::Rejected(self.code);
                }
            }
            ActivityKind::Service(_) if demand < 0 => {
                if state.get_past_max_load_at(prev_idx).unwrap_or(0) - demand > capacity {
                    return ConstraintStatus::RejectedPrune(self.code);
                }
            }
            ActivityKind::Pickup(_) => {
                if state.get_load_at(prev_idx).unwrap_or(0) + demand > capacity {
                    return ConstraintStatus::Rejected(self.code);
                }
            }
            ActivityKind::Delivery(_) => {
                // NOTE goods are carried from the pickup position up to the delivery position
                let pickup_idx = activity_ctx.related.unwrap_or(prev_idx);
                let is_overloaded =
                    (pickup_idx..=prev_idx).any(|idx| state.get_load_at(idx).unwrap_or(0) - demand > capacity);

                if is_overloaded {
                    return ConstraintStatus::RejectedPrune(self.code);
                }
            }
            _ => {}
        }

        ConstraintStatus::Fulfilled
    }
}
