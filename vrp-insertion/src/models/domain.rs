#[cfg(test)]
#[path = "../../tests/unit/models/domain_test.rs"]
mod domain_test;

use crate::construction::constraints::*;
use crate::construction::states::{BackwardVisitor, ForwardVisitor, StateManager};
use crate::models::common::{Coordinate, TimeWindow};
use crate::models::problem::*;
use crate::utils::GenericResult;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Defines a routing problem together with the constraints and state visitors used to solve it.
pub struct Problem {
    /// A fleet.
    pub fleet: Arc<Fleet>,
    /// All jobs which have to be served.
    pub jobs: Arc<Jobs>,
    /// Fleet size policy.
    pub fleet_size: FleetSize,
    /// A cost factor of penalty actors, if they are enabled.
    pub penalty_factor: Option<f64>,
    /// Routing costs.
    pub transport: Arc<dyn TransportCost>,
    /// Activity costs.
    pub activity: Arc<dyn ActivityCost>,
    /// An optional neighbourhood predicate used to skip distant insertion positions.
    pub neighbourhood: Option<Arc<dyn Neighbourhood>>,
    /// Optional location coordinates, indexed by location.
    pub coordinates: Option<Arc<Vec<Coordinate>>>,
    /// Constraints.
    pub constraint: Arc<ConstraintPipeline>,
    /// Route state visitors.
    pub states: Arc<StateManager>,
}

/// Builds a [Problem] validating its input.
pub struct ProblemBuilder {
    jobs: Vec<Job>,
    vehicles: Vec<Arc<Vehicle>>,
    driver: Option<Driver>,
    fleet_size: FleetSize,
    penalty_factor: Option<f64>,
    transport: Option<Arc<dyn TransportCost>>,
    activity: Option<Arc<dyn ActivityCost>>,
    neighbourhood: Option<Arc<dyn Neighbourhood>>,
    coordinates: Option<Vec<Coordinate>>,
    hard_route: Vec<Arc<dyn HardRouteConstraint>>,
    hard_activity: Vec<Arc<dyn HardActivityConstraint>>,
    soft_route: Vec<Arc<dyn SoftRouteConstraint>>,
    forward: Vec<Arc<dyn ForwardVisitor>>,
    backward: Vec<Arc<dyn BackwardVisitor>>,
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self {
            jobs: vec![],
            vehicles: vec![],
            driver: None,
            fleet_size: FleetSize::Finite,
            penalty_factor: None,
            transport: None,
            activity: None,
            neighbourhood: None,
            coordinates: None,
            hard_route: vec![],
            hard_activity: vec![],
            soft_route: vec![],
            forward: vec![],
            backward: vec![],
        }
    }
}

impl ProblemBuilder {
    /// Adds jobs.
    pub fn add_jobs(mut self, jobs: impl IntoIterator<Item = Job>) -> Self {
        self.jobs.extend(jobs);
        self
    }

    /// Adds vehicles.
    pub fn add_vehicles(mut self, vehicles: impl IntoIterator<Item = Vehicle>) -> Self {
        self.vehicles.extend(vehicles.into_iter().map(Arc::new));
        self
    }

    /// Sets a driver of all vehicles. By default, a driver has no costs.
    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Sets fleet size policy. Default is finite.
    pub fn with_fleet_size(mut self, fleet_size: FleetSize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    /// Enables penalty actors for finite fleet: their costs are multiplied by given factor.
    pub fn with_penalty_vehicles(mut self, factor: f64) -> Self {
        self.penalty_factor = Some(factor);
        self
    }

    /// Sets transport costs.
    pub fn with_transport_cost(mut self, transport: Arc<dyn TransportCost>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets activity costs. Default is [SimpleActivityCost].
    pub fn with_activity_cost(mut self, activity: Arc<dyn ActivityCost>) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Sets neighbourhood predicate.
    pub fn with_neighbourhood(mut self, neighbourhood: Arc<dyn Neighbourhood>) -> Self {
        self.neighbourhood = Some(neighbourhood);
        self
    }

    /// Sets location coordinates used as a straight line fallback for unknown routing distances.
    pub fn with_coordinates(mut self, coordinates: Vec<Coordinate>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Adds a custom hard route constraint evaluated after the default ones.
    pub fn add_hard_route_constraint(mut self, constraint: Arc<dyn HardRouteConstraint>) -> Self {
        self.hard_route.push(constraint);
        self
    }

    /// Adds a custom hard activity constraint evaluated after the default ones.
    pub fn add_hard_activity_constraint(mut self, constraint: Arc<dyn HardActivityConstraint>) -> Self {
        self.hard_activity.push(constraint);
        self
    }

    /// Adds a custom soft route constraint.
    pub fn add_soft_route_constraint(mut self, constraint: Arc<dyn SoftRouteConstraint>) -> Self {
        self.soft_route.push(constraint);
        self
    }

    /// Adds a custom forward state visitor.
    pub fn add_forward_visitor(mut self, visitor: Arc<dyn ForwardVisitor>) -> Self {
        self.forward.push(visitor);
        self
    }

    /// Adds a custom backward state visitor.
    pub fn add_backward_visitor(mut self, visitor: Arc<dyn BackwardVisitor>) -> Self {
        self.backward.push(visitor);
        self
    }

    /// Builds a problem.
    pub fn build(self) -> GenericResult<Problem> {
        self.validate()?;

        let transport = self.transport.ok_or("transport costs are not set")?;
        let activity = self.activity.unwrap_or_else(|| Arc::new(SimpleActivityCost::default()));
        let fleet = Arc::new(Fleet::new(Arc::new(self.driver.unwrap_or_else(Driver::empty)), self.vehicles));

        let mut states = StateManager::new(fleet.as_ref(), transport.clone(), activity.clone());
        self.forward.into_iter().for_each(|visitor| {
            states.add_forward_visitor(visitor);
        });
        self.backward.into_iter().for_each(|visitor| {
            states.add_backward_visitor(visitor);
        });

        let capacity = Arc::new(CapacityConstraint::default());
        let time = Arc::new(TimeWindowConstraint::new(transport.clone(), activity.clone()));

        let mut constraint = ConstraintPipeline::default();
        constraint.add_hard_route(capacity.clone()).add_hard_route(time.clone());
        constraint.add_hard_activity(capacity).add_hard_activity(time);
        constraint.add_soft_route(Arc::new(FixedCostConstraint::default()));
        self.hard_route.into_iter().for_each(|c| {
            constraint.add_hard_route(c);
        });
        self.hard_activity.into_iter().for_each(|c| {
            constraint.add_hard_activity(c);
        });
        self.soft_route.into_iter().for_each(|c| {
            constraint.add_soft_route(c);
        });

        Ok(Problem {
            fleet,
            jobs: Arc::new(Jobs::new(self.jobs)),
            fleet_size: self.fleet_size,
            penalty_factor: self.penalty_factor,
            transport,
            activity,
            neighbourhood: self.neighbourhood,
            coordinates: self.coordinates.map(Arc::new),
            constraint: Arc::new(constraint),
            states: Arc::new(states),
        })
    }

    fn validate(&self) -> GenericResult<()> {
        if self.vehicles.is_empty() {
            return Err("fleet has no vehicles".into());
        }

        let mut vehicle_ids = FxHashSet::default();
        if let Some(vehicle) = self.vehicles.iter().find(|vehicle| !vehicle_ids.insert(vehicle.id.as_str())) {
            return Err(format!("duplicate vehicle id: '{}'", vehicle.id).into());
        }

        if let Some(vehicle) = self.vehicles.iter().find(|vehicle| vehicle.capacity() < 0) {
            return Err(format!("vehicle '{}' has negative capacity", vehicle.id).into());
        }

        if let Some(vehicle) = self.vehicles.iter().find(|vehicle| !is_valid_time_window(&vehicle.time)) {
            return Err(format!("vehicle '{}' has invalid operating time window", vehicle.id).into());
        }

        let mut job_ids = FxHashSet::default();
        if let Some(job) = self.jobs.iter().find(|job| !job_ids.insert(job.id())) {
            return Err(format!("duplicate job id: '{}'", job.id()).into());
        }

        if let Some(job) = self.jobs.iter().find(|job| job.places().any(|place| !is_valid_time_window(&place.time))) {
            return Err(format!("job '{}' has invalid time window", job.id()).into());
        }

        if let Some(job) = self.jobs.iter().find(|job| job.places().any(|place| place.duration < 0.)) {
            return Err(format!("job '{}' has negative duration", job.id()).into());
        }

        if let Some(job) = self.jobs.iter().find(|job| job.as_shipment().is_some_and(|shipment| shipment.demand < 0)) {
            return Err(format!("shipment '{}' has negative demand", job.id()).into());
        }

        if let (Some(coordinates), Some(job)) = (self.coordinates.as_ref(), self.jobs.iter().find(|job| {
            job.places().any(|place| self.coordinates.as_ref().is_some_and(|c| place.location >= c.len()))
        })) {
            return Err(format!(
                "job '{}' has location outside of {} known coordinates",
                job.id(),
                coordinates.len()
            )
            .into());
        }

        if let Some(size) = self.transport.as_ref().and_then(|transport| transport.locations()) {
            if let Some(job) = self.jobs.iter().find(|job| job.places().any(|place| place.location >= size)) {
                return Err(format!("job '{}' has location outside of routing matrix of size {size}", job.id()).into());
            }

            if let Some(vehicle) = self.vehicles.iter().find(|vehicle| vehicle.start >= size || vehicle.end >= size) {
                return Err(
                    format!("vehicle '{}' has location outside of routing matrix of size {size}", vehicle.id).into()
                );
            }
        }

        if self.penalty_factor.is_some_and(|factor| factor < 1.) {
            return Err("penalty factor must not be less than one".into());
        }

        Ok(())
    }
}

fn is_valid_time_window(time: &TimeWindow) -> bool {
    time.start <= time.end
}
