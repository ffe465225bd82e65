#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/context_test.rs"]
mod context_test;

use crate::construction::states::*;
use crate::models::common::{Cost, Timestamp};
use crate::models::problem::{Actor, Job};
use crate::models::solution::{Activity, FleetManager, Route};
use crate::models::Problem;
use crate::utils::compare_shared;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A stable identity of a route within a solution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct RouteId(pub usize);

/// Keeps a route together with its derived state.
pub struct RouteContext {
    id: Option<RouteId>,
    route: Route,
    state: RouteState,
    is_stale: bool,
}

impl RouteContext {
    /// Creates a new empty route context with given id.
    pub fn new(id: RouteId, actor: Arc<Actor>) -> Self {
        Self { id: Some(id), route: Route::new(actor), state: RouteState::default(), is_stale: true }
    }

    /// Creates an empty route context which is not a part of any solution.
    pub fn new_prototype(actor: Arc<Actor>) -> Self {
        Self { id: None, route: Route::new(actor), state: RouteState::default(), is_stale: true }
    }

    /// Returns route id. Prototypes have none.
    pub fn id(&self) -> Option<RouteId> {
        self.id
    }

    /// Returns a reference to route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns a reference to state.
    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// Returns mutable reference to route. Marks context as stale.
    pub fn route_mut(&mut self) -> &mut Route {
        self.mark_stale(true);
        &mut self.route
    }

    /// Returns mutable reference to state. Marks context as stale.
    pub fn state_mut(&mut self) -> &mut RouteState {
        self.mark_stale(true);
        &mut self.state
    }

    /// Unwraps context as pair of mutable references. Marks context as stale.
    pub fn as_mut(&mut self) -> (&mut Route, &mut RouteState) {
        self.mark_stale(true);
        (&mut self.route, &mut self.state)
    }

    /// Returns true if route was changed after the last state update.
    pub fn is_stale(&self) -> bool {
        self.is_stale
    }

    /// Marks context stale or resets the flag.
    pub(crate) fn mark_stale(&mut self, is_stale: bool) {
        self.is_stale = is_stale;
    }

    /// Assigns another actor to the route replacing start and end sentinels.
    pub fn switch_actor(&mut self, actor: Arc<Actor>) {
        let route = self.route_mut();
        route.tour.set_sentinels(actor.as_ref());
        route.actor = actor;
    }

    /// Creates a deep copy of the context.
    pub fn deep_copy(&self) -> Self {
        Self { id: self.id, route: self.route.deep_copy(), state: self.state.clone(), is_stale: self.is_stale }
    }
}

impl Debug for RouteContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteContext")
            .field("id", &self.id)
            .field("vehicle", &self.route.actor.vehicle.id)
            .field("jobs", &self.route.tour.job_count())
            .field("is_stale", &self.is_stale)
            .finish()
    }
}

/// Keeps track of used vehicles and provides empty route prototypes for new routes.
pub struct RegistryContext {
    /// A fleet manager.
    pub fleet: FleetManager,
    prototypes: Arc<Vec<RouteContext>>,
}

impl RegistryContext {
    /// Creates a new instance of `RegistryContext` with one empty route prototype per fleet slot.
    pub fn new(problem: &Problem) -> Self {
        let prototypes = problem
            .fleet
            .representatives
            .iter()
            .map(|actor| {
                let mut route_ctx = RouteContext::new_prototype(actor.clone());
                problem.states.update_route(&mut route_ctx);
                route_ctx
            })
            .collect();

        Self {
            fleet: FleetManager::new(problem.fleet.as_ref(), problem.fleet_size, problem.penalty_factor),
            prototypes: Arc::new(prototypes),
        }
    }

    /// Returns one available actor per fleet slot within empty route prototype of the slot.
    pub fn next(&self) -> impl Iterator<Item = (Arc<Actor>, &RouteContext)> + '_ {
        self.fleet.available().filter_map(move |actor| {
            let slot = actor.slot;
            self.prototypes.get(slot).map(|route_ctx| (actor, route_ctx))
        })
    }

    /// Creates a deep copy of the context. Prototypes are never mutated and are shared.
    pub fn deep_copy(&self) -> Self {
        Self { fleet: self.fleet.clone(), prototypes: self.prototypes.clone() }
    }
}

/// Contains information regarding the solution being constructed.
pub struct SolutionContext {
    /// Routes within their state.
    pub routes: Vec<RouteContext>,

    /// Keeps track of used vehicles.
    pub registry: RegistryContext,

    /// Jobs which cannot be assigned within the last violated constraint code.
    pub unassigned: FxHashMap<Job, i32>,

    next_route_id: usize,
}

impl SolutionContext {
    /// Creates an empty solution for given problem.
    pub fn new(problem: &Problem) -> Self {
        Self {
            routes: vec![],
            registry: RegistryContext::new(problem),
            unassigned: FxHashMap::default(),
            next_route_id: 0,
        }
    }

    /// Creates a new empty route for given actor and returns its index in routes collection.
    /// The actor is not locked.
    pub fn create_route(&mut self, actor: Arc<Actor>) -> usize {
        let id = RouteId(self.next_route_id);
        self.next_route_id += 1;
        self.routes.push(RouteContext::new(id, actor));

        self.routes.len() - 1
    }

    /// Returns index of the route with given id.
    pub fn route_index(&self, id: RouteId) -> Option<usize> {
        self.routes.iter().position(|route_ctx| route_ctx.id == Some(id))
    }

    /// Returns route with given id.
    pub fn route(&self, id: RouteId) -> Option<&RouteContext> {
        self.routes.iter().find(|route_ctx| route_ctx.id == Some(id))
    }

    /// Returns index of the route which serves given job.
    pub fn find_route_index(&self, job: &Job) -> Option<usize> {
        self.routes.iter().position(|route_ctx| route_ctx.route.tour.contains(job))
    }

    /// Returns all jobs assigned to routes.
    pub fn assigned_jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.routes.iter().flat_map(|route_ctx| route_ctx.route.tour.jobs())
    }

    /// Removes routes without jobs and returns back their actors to the fleet.
    pub fn remove_empty_routes(&mut self) {
        let (keep, remove): (Vec<_>, Vec<_>) =
            self.routes.drain(..).partition(|route_ctx| route_ctx.route.tour.has_jobs());

        remove.iter().for_each(|route_ctx| self.registry.fleet.unlock(&route_ctx.route.actor));

        self.routes = keep;
    }

    /// Returns total cost of the solution: variable route costs plus fixed actor costs.
    /// Valid only when no route is stale.
    pub fn get_total_cost(&self) -> Cost {
        self.routes
            .iter()
            .map(|route_ctx| route_ctx.state.get_total_cost().unwrap_or(0.) + route_ctx.route.actor.fixed_cost())
            .sum()
    }

    /// Creates a deep copy of the solution.
    pub fn deep_copy(&self) -> Self {
        Self {
            routes: self.routes.iter().map(|route_ctx| route_ctx.deep_copy()).collect(),
            registry: self.registry.deep_copy(),
            unassigned: self.unassigned.clone(),
            next_route_id: self.next_route_id,
        }
    }
}

impl Debug for SolutionContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionContext")
            .field("routes", &self.routes)
            .field("unassigned", &self.unassigned.len())
            .finish_non_exhaustive()
    }
}

/// A transient context of a single evaluation: a job tried in a route with a candidate actor.
/// When the candidate differs from the route actor, route sentinels are substituted.
pub struct InsertionContext<'a> {
    /// A route where job is evaluated.
    pub route_ctx: &'a RouteContext,
    /// A job being evaluated.
    pub job: &'a Job,
    /// A candidate actor.
    pub actor: &'a Arc<Actor>,
    /// A candidate departure time from route start.
    pub departure: Timestamp,
    start: Activity,
    end: Activity,
}

impl<'a> InsertionContext<'a> {
    /// Creates a new instance of `InsertionContext`.
    pub fn new(route_ctx: &'a RouteContext, job: &'a Job, actor: &'a Arc<Actor>) -> Self {
        let route = route_ctx.route();
        let (start, end) = if compare_shared(&route.actor, actor) {
            (route.tour.start().clone(), route.tour.end().clone())
        } else {
            (Activity::new_start(actor), Activity::new_end(actor))
        };

        Self { route_ctx, job, actor, departure: start.schedule.departure, start, end }
    }

    /// Returns true if candidate actor differs from the route actor.
    pub fn is_actor_switched(&self) -> bool {
        !compare_shared(&self.route_ctx.route().actor, self.actor)
    }

    /// Returns tour index of the end sentinel.
    pub fn last_index(&self) -> usize {
        self.route_ctx.route().tour.total() - 1
    }

    /// Returns activity at given tour index with sentinels of the candidate actor.
    pub fn activity(&self, activity_idx: usize) -> &Activity {
        if activity_idx == 0 {
            &self.start
        } else if activity_idx >= self.last_index() {
            &self.end
        } else {
            self.route_ctx.route().tour.get(activity_idx).unwrap_or(&self.end)
        }
    }

    /// Returns the latest operation start of the activity at given tour index for candidate actor.
    pub fn latest_start_at(&self, activity_idx: usize) -> Timestamp {
        if activity_idx >= self.last_index() {
            self.actor.vehicle.time.end
        } else {
            get_latest_start(self.route_ctx.state(), self.activity(activity_idx), activity_idx, self.actor.slot)
        }
    }

    /// Returns cumulative route cost at given tour index.
    pub fn cost_at(&self, activity_idx: usize) -> Cost {
        self.route_ctx.state().get_cumulative_cost_at(activity_idx).unwrap_or(0.)
    }
}

/// Specifies a position of activity insertion: between `prev` and `next`.
pub struct ActivityContext<'a> {
    /// Tour index of the previous activity: the new activity takes `index + 1`.
    pub index: usize,
    /// Previous activity.
    pub prev: &'a Activity,
    /// Target activity.
    pub target: &'a Activity,
    /// Next activity.
    pub next: &'a Activity,
    /// Departure time from previous activity.
    pub prev_departure: Timestamp,
    /// Tour index of the activity after which the paired pickup is inserted, set for delivery only.
    pub related: Option<usize>,
}
