#[cfg(test)]
#[path = "../../../tests/unit/construction/states/updaters_test.rs"]
mod updaters_test;

use crate::construction::states::*;
use crate::models::common::Demand;
use crate::models::problem::{ActivityCost, Actor, TransportCost, TravelTime};
use crate::models::solution::{Activity, ActivityKind, Route};
use std::sync::Arc;

/// Updates cumulative cost of each activity and total cost of the route.
pub struct CostUpdater {
    transport: Arc<dyn TransportCost>,
    activity: Arc<dyn ActivityCost>,
}

impl CostUpdater {
    /// Creates a new instance of `CostUpdater`.
    pub fn new(transport: Arc<dyn TransportCost>, activity: Arc<dyn ActivityCost>) -> Self {
        Self { transport, activity }
    }
}

impl ForwardVisitor for CostUpdater {
    fn state_keys(&self) -> &[StateKey] {
        &[COST_KEY]
    }

    fn visit(&self, route: &Route, activity_idx: usize, state: &mut RouteState) {
        if activity_idx == 0 {
            state.set_cumulative_cost_at(0, 0.);
            return;
        }

        let (Some(prev), Some(current)) = (route.tour.get(activity_idx - 1), route.tour.get(activity_idx)) else {
            return;
        };

        let actor = route.actor.as_ref();
        let leg_cost = self.transport.cost(
            actor,
            prev.place.location,
            current.place.location,
            TravelTime::Departure(prev.schedule.departure),
        ) + self.activity.cost(actor, current, current.schedule.arrival);

        let total = state.get_cumulative_cost_at(activity_idx - 1).unwrap_or(0.) + leg_cost;
        state.set_cumulative_cost_at(activity_idx, total);
    }

    fn finish(&self, route: &Route, state: &mut RouteState) {
        let total = state.get_cumulative_cost_at(route.tour.total() - 1).unwrap_or(0.);
        state.set_total_cost(total);
    }
}

/// Updates total distance and duration of the route.
pub struct StatisticsUpdater {
    transport: Arc<dyn TransportCost>,
}

impl StatisticsUpdater {
    /// Creates a new instance of `StatisticsUpdater`.
    pub fn new(transport: Arc<dyn TransportCost>) -> Self {
        Self { transport }
    }
}

impl ForwardVisitor for StatisticsUpdater {
    fn state_keys(&self) -> &[StateKey] {
        &[TOTAL_DISTANCE_KEY, TOTAL_DURATION_KEY]
    }

    fn visit(&self, _: &Route, _: usize, _: &mut RouteState) {}

    fn finish(&self, route: &Route, state: &mut RouteState) {
        let activities = route.tour.all_activities().collect::<Vec<_>>();
        let distance = activities
            .windows(2)
            .map(|leg| {
                self.transport.distance(
                    route.actor.as_ref(),
                    leg[0].place.location,
                    leg[1].place.location,
                    TravelTime::Departure(leg[0].schedule.departure),
                )
            })
            .sum();

        state.set_total_distance(distance);
        state.set_total_duration(route.tour.end().schedule.arrival - route.tour.start().schedule.departure);
    }
}

/// Updates load related states: load at route beginning and end, load after each activity,
/// maximum load in the past and the maximum load in the route.
#[derive(Default)]
pub struct LoadUpdater {}

impl ForwardVisitor for LoadUpdater {
    fn state_keys(&self) -> &[StateKey] {
        &[LOAD_KEY, LOAD_AT_BEGINNING_KEY, LOAD_AT_END_KEY, MAX_LOAD_KEY, PAST_MAX_LOAD_KEY]
    }

    fn begin(&self, route: &Route, state: &mut RouteState) {
        let (at_beginning, at_end) =
            route.tour.all_activities().fold((0, 0), |(at_beginning, at_end), activity| match &activity.kind {
                ActivityKind::Service(_) if activity.demand < 0 => (at_beginning - activity.demand, at_end),
                ActivityKind::Service(_) => (at_beginning, at_end + activity.demand),
                _ => (at_beginning, at_end),
            });

        state.set_load_at_beginning(at_beginning);
        state.set_load_at_end(at_end);
    }

    fn visit(&self, route: &Route, activity_idx: usize, state: &mut RouteState) {
        let (load, past_max): (Demand, Demand) = if activity_idx == 0 {
            let load = state.get_load_at_beginning().unwrap_or(0);
            (load, load)
        } else {
            let demand = route.tour.get(activity_idx).map_or(0, |activity| activity.demand);
            let load = state.get_load_at(activity_idx - 1).unwrap_or(0) + demand;
            (load, state.get_past_max_load_at(activity_idx - 1).unwrap_or(0).max(load))
        };

        state.set_load_at(activity_idx, load);
        state.set_past_max_load_at(activity_idx, past_max);
    }

    fn finish(&self, route: &Route, state: &mut RouteState) {
        let max_load = state.get_past_max_load_at(route.tour.total() - 1).unwrap_or(0);
        state.set_max_load(max_load);
    }
}

/// Updates maximum load from each activity up to route end. Requires loads from forward traversal.
#[derive(Default)]
pub struct FutureMaxLoadUpdater {}

impl BackwardVisitor for FutureMaxLoadUpdater {
    fn state_keys(&self) -> &[StateKey] {
        &[FUTURE_MAX_LOAD_KEY]
    }

    fn visit(&self, route: &Route, activity_idx: usize, state: &mut RouteState) {
        let load = state.get_load_at(activity_idx).unwrap_or(0);
        let future_max = if activity_idx + 1 < route.tour.total() {
            state.get_future_max_load_at(activity_idx + 1).unwrap_or(0).max(load)
        } else {
            load
        };

        state.set_future_max_load_at(activity_idx, future_max);
    }
}

/// Updates the latest operation start time of each job activity and route end for every
/// fleet slot, so that a route can be checked against another vehicle without re-traversal.
pub struct LatestStartUpdater {
    transport: Arc<dyn TransportCost>,
    activity: Arc<dyn ActivityCost>,
    representatives: Vec<Arc<Actor>>,
}

impl LatestStartUpdater {
    /// Creates a new instance of `LatestStartUpdater` using one actor per fleet slot.
    pub fn new(
        transport: Arc<dyn TransportCost>,
        activity: Arc<dyn ActivityCost>,
        representatives: Vec<Arc<Actor>>,
    ) -> Self {
        Self { transport, activity, representatives }
    }

    fn update_slot(&self, route: &Route, actor: &Actor, activity_idx: usize, state: &mut RouteState) {
        let last_idx = route.tour.total() - 1;

        if activity_idx == last_idx {
            state.set_latest_start_at(activity_idx, actor.slot, actor.vehicle.time.end);
            return;
        }

        let (Some(current), Some(next)) = (route.tour.get(activity_idx), route.tour.get(activity_idx + 1)) else {
            return;
        };
        let Some(next_latest) = state.get_latest_start_at(activity_idx + 1, actor.slot) else { return };

        let next_location = if activity_idx + 1 == last_idx { actor.vehicle.end } else { next.place.location };
        let latest_departure = next_latest
            - self.transport.duration(
                actor,
                current.place.location,
                next_location,
                TravelTime::Arrival(next_latest),
            );

        let latest_start = self.activity.estimate_arrival(actor, current, latest_departure);
        state.set_latest_start_at(activity_idx, actor.slot, latest_start);
    }
}

impl BackwardVisitor for LatestStartUpdater {
    fn state_keys(&self) -> &[StateKey] {
        &[LATEST_START_KEY]
    }

    fn visit(&self, route: &Route, activity_idx: usize, state: &mut RouteState) {
        // NOTE start sentinel depends on the vehicle and is not needed by time checks
        if activity_idx == 0 {
            return;
        }

        self.representatives.iter().for_each(|representative| {
            let actor =
                if representative.slot == route.actor.slot { route.actor.as_ref() } else { representative.as_ref() };
            self.update_slot(route, actor, activity_idx, state);
        });
    }
}

/// Returns the latest operation start of the activity for given slot falling back to its time window.
pub fn get_latest_start(state: &RouteState, activity: &Activity, activity_idx: usize, slot: usize) -> f64 {
    state.get_latest_start_at(activity_idx, slot).unwrap_or(activity.place.time.end)
}
