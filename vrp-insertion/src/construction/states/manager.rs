#[cfg(test)]
#[path = "../../../tests/unit/construction/states/manager_test.rs"]
mod manager_test;

use crate::construction::heuristics::{RouteContext, SolutionContext};
use crate::construction::states::*;
use crate::models::problem::{ActivityCost, Fleet, TransportCost};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Keeps the ordered lists of forward and backward visitors and refreshes route state by running
/// both traversals. Every state key can be written by exactly one visitor.
pub struct StateManager {
    transport: Arc<dyn TransportCost>,
    activity: Arc<dyn ActivityCost>,
    forward: Vec<Arc<dyn ForwardVisitor>>,
    backward: Vec<Arc<dyn BackwardVisitor>>,
    keys: FxHashSet<StateKey>,
}

impl StateManager {
    /// Creates a new instance of `StateManager` without visitors.
    pub fn empty(transport: Arc<dyn TransportCost>, activity: Arc<dyn ActivityCost>) -> Self {
        Self { transport, activity, forward: vec![], backward: vec![], keys: FxHashSet::default() }
    }

    /// Creates a new instance of `StateManager` with cost, statistics, load and time visitors.
    pub fn new(fleet: &Fleet, transport: Arc<dyn TransportCost>, activity: Arc<dyn ActivityCost>) -> Self {
        let mut manager = Self::empty(transport.clone(), activity.clone());

        manager.add_forward_visitor(Arc::new(CostUpdater::new(transport.clone(), activity.clone())));
        manager.add_forward_visitor(Arc::new(StatisticsUpdater::new(transport.clone())));
        manager.add_forward_visitor(Arc::new(LoadUpdater::default()));
        manager.add_backward_visitor(Arc::new(FutureMaxLoadUpdater::default()));
        manager.add_backward_visitor(Arc::new(LatestStartUpdater::new(
            transport,
            activity,
            fleet.representatives.clone(),
        )));

        manager
    }

    /// Adds a visitor to the end of forward traversal list.
    pub fn add_forward_visitor(&mut self, visitor: Arc<dyn ForwardVisitor>) -> &mut Self {
        self.register_keys(visitor.state_keys());
        self.forward.push(visitor);
        self
    }

    /// Adds a visitor to the end of backward traversal list.
    pub fn add_backward_visitor(&mut self, visitor: Arc<dyn BackwardVisitor>) -> &mut Self {
        self.register_keys(visitor.state_keys());
        self.backward.push(visitor);
        self
    }

    /// Recomputes the whole state of the route: schedules, forward and backward states.
    pub fn update_route(&self, route_ctx: &mut RouteContext) {
        let (route, state) = route_ctx.as_mut();

        state.clear();
        for_each_forward(route, state, self.transport.as_ref(), self.activity.as_ref(), self.forward.as_slice());
        for_each_backward(route, state, self.backward.as_slice());

        route_ctx.mark_stale(false);
    }

    /// Recomputes the state of every route marked as stale.
    pub fn update_solution(&self, solution_ctx: &mut SolutionContext) {
        solution_ctx.routes.iter_mut().filter(|route_ctx| route_ctx.is_stale()).for_each(|route_ctx| {
            self.update_route(route_ctx);
        });
    }

    /// Returns transport costs used to compute schedules and costs.
    pub fn transport(&self) -> &Arc<dyn TransportCost> {
        &self.transport
    }

    /// Returns activity costs used to compute schedules and costs.
    pub fn activity(&self) -> &Arc<dyn ActivityCost> {
        &self.activity
    }

    fn register_keys(&mut self, keys: &[StateKey]) {
        keys.iter().for_each(|key| {
            assert!(self.keys.insert(*key), "state key {} is registered by more than one visitor", key.id());
        });
    }
}
