#[cfg(test)]
#[path = "../../../tests/unit/construction/states/traversal_test.rs"]
mod traversal_test;

use crate::construction::states::{RouteState, StateKey};
use crate::models::common::Schedule;
use crate::models::problem::{ActivityCost, TransportCost, TravelTime};
use crate::models::solution::Route;
use std::sync::Arc;

/// A visitor which is called by forward traversal after activity schedule is updated.
pub trait ForwardVisitor: Send + Sync {
    /// Returns state keys written by the visitor.
    fn state_keys(&self) -> &[StateKey];

    /// Called before the first activity is visited.
    fn begin(&self, _route: &Route, _state: &mut RouteState) {}

    /// Called for each activity from start to end.
    fn visit(&self, route: &Route, activity_idx: usize, state: &mut RouteState);

    /// Called after the last activity is visited.
    fn finish(&self, _route: &Route, _state: &mut RouteState) {}
}

/// A visitor which is called by backward traversal.
pub trait BackwardVisitor: Send + Sync {
    /// Returns state keys written by the visitor.
    fn state_keys(&self) -> &[StateKey];

    /// Called before the last activity is visited.
    fn begin(&self, _route: &Route, _state: &mut RouteState) {}

    /// Called for each activity from end to start.
    fn visit(&self, route: &Route, activity_idx: usize, state: &mut RouteState);

    /// Called after the first activity is visited.
    fn finish(&self, _route: &Route, _state: &mut RouteState) {}
}

/// Walks the route from start to end, updating arrival and departure of every activity
/// and notifying visitors in their order.
pub fn for_each_forward(
    route: &mut Route,
    state: &mut RouteState,
    transport: &dyn TransportCost,
    activity: &dyn ActivityCost,
    visitors: &[Arc<dyn ForwardVisitor>],
) {
    visitors.iter().for_each(|visitor| visitor.begin(route, state));

    let actor = route.actor.clone();
    let start = route.tour.start();
    let (mut location, mut departure) = (start.place.location, start.schedule.departure);
    visitors.iter().for_each(|visitor| visitor.visit(route, 0, state));

    for activity_idx in 1..route.tour.total() {
        let Some(current) = route.tour.get_mut(activity_idx) else { break };

        let arrival =
            departure + transport.duration(&actor, location, current.place.location, TravelTime::Departure(departure));
        let current_departure = activity.estimate_departure(&actor, current, arrival);
        current.schedule = Schedule::new(arrival, current_departure);

        location = current.place.location;
        departure = current_departure;

        visitors.iter().for_each(|visitor| visitor.visit(route, activity_idx, state));
    }

    visitors.iter().for_each(|visitor| visitor.finish(route, state));
}

/// Walks the route from end to start notifying visitors in their order.
pub fn for_each_backward(route: &Route, state: &mut RouteState, visitors: &[Arc<dyn BackwardVisitor>]) {
    visitors.iter().for_each(|visitor| visitor.begin(route, state));

    (0..route.tour.total()).rev().for_each(|activity_idx| {
        visitors.iter().for_each(|visitor| visitor.visit(route, activity_idx, state));
    });

    visitors.iter().for_each(|visitor| visitor.finish(route, state));
}
