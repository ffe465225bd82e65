#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/time_test.rs"]
mod time_test;

use crate::construction::constraints::*;
use crate::construction::heuristics::{ActivityContext, InsertionContext};
use crate::models::problem::{ActivityCost, TransportCost, TravelTime};
use std::sync::Arc;

/// Checks whether actor can serve activity within its time window and without violating time
/// windows of the following activities. Relies on latest start states.
pub struct TimeWindowConstraint {
    code: i32,
    transport: Arc<dyn TransportCost>,
    activity: Arc<dyn ActivityCost>,
}

impl TimeWindowConstraint {
    /// Creates a new instance of `TimeWindowConstraint`.
    pub fn new(transport: Arc<dyn TransportCost>, activity: Arc<dyn ActivityCost>) -> Self {
        Self { code: TIME_CONSTRAINT_CODE, transport, activity }
    }
}

impl HardRouteConstraint for TimeWindowConstraint {
    fn evaluate_job(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation> {
        let shift = &ctx.actor.vehicle.time;

        let can_serve_job = ctx.job.places().all(|place| place.time.intersects(shift));
        let can_serve_tour = !ctx.is_actor_switched() || self.can_serve_tour(ctx);

        if can_serve_job && can_serve_tour {
            None
        } else {
            Some(RouteConstraintViolation { code: self.code })
        }
    }
}

impl TimeWindowConstraint {
    /// Replays the existing tour with the candidate actor and checks that every activity, including
    /// the end of the shift, is still reached in time.
    fn can_serve_tour(&self, ctx: &InsertionContext) -> bool {
        let actor = ctx.actor.as_ref();

        (1..=ctx.last_index())
            .try_fold(ctx.departure, |departure, activity_idx| {
                let (prev, current) = (ctx.activity(activity_idx - 1), ctx.activity(activity_idx));
                let arrival = departure
                    + self.transport.duration(
                        actor,
                        prev.place.location,
                        current.place.location,
                        TravelTime::Departure(departure),
                    );

                (arrival <= current.place.time.end).then(|| self.activity.estimate_departure(actor, current, arrival))
            })
            .is_some()
    }
}

impl HardActivityConstraint for TimeWindowConstraint {
    fn evaluate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ConstraintStatus {
        let actor = ctx.actor.as_ref();
        let (prev, target, next) = (activity_ctx.prev, activity_ctx.target, activity_ctx.next);
        let departure = activity_ctx.prev_departure;

        let latest_arr_at_next = ctx.latest_start_at(activity_ctx.index + 1);

        if prev.place.time.start > target.place.time.end {
            return ConstraintStatus::RejectedPrune(self.code);
        }

        let arr_at_target = departure
            + self.transport.duration(
                actor,
                prev.place.location,
                target.place.location,
                TravelTime::Departure(departure),
            );

        if arr_at_target > target.place.time.end {
            return ConstraintStatus::RejectedPrune(self.code);
        }

        if target.place.time.start > latest_arr_at_next {
            return ConstraintStatus::Rejected(self.code);
        }

        let latest_dep_at_target = latest_arr_at_next
            - self.transport.duration(
                actor,
                target.place.location,
                next.place.location,
                TravelTime::Arrival(latest_arr_at_next),
            );
        let latest_arr_at_target = self.activity.estimate_arrival(actor, target, latest_dep_at_target);

        if arr_at_target > latest_arr_at_target {
            return ConstraintStatus::Rejected(self.code);
        }

        let dep_at_target = self.activity.estimate_departure(actor, target, arr_at_target);
        let arr_at_next = dep_at_target
            + self.transport.duration(
                actor,
                target.place.location,
                next.place.location,
                TravelTime::Departure(dep_at_target),
            );

        if arr_at_next > latest_arr_at_next {
            return ConstraintStatus::Rejected(self.code);
        }

        ConstraintStatus::Fulfilled
    }
}
