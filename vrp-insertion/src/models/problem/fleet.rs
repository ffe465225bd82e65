#[cfg(test)]
#[path = "../../../tests/unit/models/problem/fleet_test.rs"]
mod fleet_test;

use crate::models::common::*;
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents operating costs for driver and vehicle.
#[derive(Clone, Debug)]
pub struct Costs {
    /// A fixed cost to use an actor.
    pub fixed: f64,
    /// Cost per distance unit.
    pub per_distance: f64,
    /// Cost per driving time unit.
    pub per_driving_time: f64,
    /// Cost per waiting time unit.
    pub per_waiting_time: f64,
    /// Cost per service time unit.
    pub per_service_time: f64,
}

impl Costs {
    /// Returns costs with all values multiplied by given factor.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            fixed: self.fixed * factor,
            per_distance: self.per_distance * factor,
            per_driving_time: self.per_driving_time * factor,
            per_waiting_time: self.per_waiting_time * factor,
            per_service_time: self.per_service_time * factor,
        }
    }
}

impl Default for Costs {
    fn default() -> Self {
        Self { fixed: 0., per_distance: 0., per_driving_time: 0., per_waiting_time: 0., per_service_time: 0. }
    }
}

/// Represents a vehicle type shared by interchangeable vehicles.
#[derive(Clone, Debug)]
pub struct VehicleType {
    /// Type id.
    pub id: String,
    /// Vehicle capacity.
    pub capacity: Demand,
    /// Vehicle costs.
    pub costs: Costs,
}

/// Represents a vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Vehicle id.
    pub id: String,
    /// Vehicle type.
    pub vehicle_type: Arc<VehicleType>,
    /// Start location.
    pub start: Location,
    /// End location.
    pub end: Location,
    /// Operating window: earliest departure and latest arrival.
    pub time: TimeWindow,
}

impl Vehicle {
    /// Returns vehicle capacity.
    pub fn capacity(&self) -> Demand {
        self.vehicle_type.capacity
    }

    /// Returns vehicle costs.
    pub fn costs(&self) -> &Costs {
        &self.vehicle_type.costs
    }
}

/// Represents a driver, person who drives a vehicle.
#[derive(Clone, Debug)]
pub struct Driver {
    /// Driver id.
    pub id: String,
    /// Specifies operating costs for driver.
    pub costs: Costs,
}

impl Driver {
    /// Creates a driver without any costs.
    pub fn empty() -> Self {
        Self { id: "driver".to_string(), costs: Costs::default() }
    }
}

/// Pools interchangeable vehicles: same type, start and end location, and operating window.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct TypeKey {
    /// Vehicle type id.
    pub type_id: String,
    /// Start location.
    pub start: Location,
    /// End location.
    pub end: Location,
    /// Operating window.
    pub time: TimeWindow,
}

impl TypeKey {
    /// Creates a type key for given vehicle.
    pub fn new(vehicle: &Vehicle) -> Self {
        Self {
            type_id: vehicle.vehicle_type.id.clone(),
            start: vehicle.start,
            end: vehicle.end,
            time: vehicle.time.clone(),
        }
    }
}

/// Represents an actor: a vehicle driven by a driver.
#[derive(Debug)]
pub struct Actor {
    /// A vehicle.
    pub vehicle: Arc<Vehicle>,
    /// A driver.
    pub driver: Arc<Driver>,
    /// A vehicle pool key.
    pub type_key: TypeKey,
    /// A dense index of type key, used to address vehicle dependent states.
    pub slot: usize,
    /// True if the actor is an unlimited penalty actor.
    pub is_penalty: bool,
}

impl Actor {
    /// Returns capacity of the actor.
    pub fn capacity(&self) -> Demand {
        self.vehicle.capacity()
    }

    /// Returns a fixed cost of the actor usage.
    pub fn fixed_cost(&self) -> Cost {
        self.vehicle.costs().fixed + self.driver.costs.fixed
    }
}

impl PartialEq<Actor> for Actor {
    fn eq(&self, other: &Actor) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self as *const Actor).hash(state);
    }
}

/// Represents available resources to serve jobs.
pub struct Fleet {
    /// All drivers.
    pub drivers: Vec<Arc<Driver>>,
    /// All vehicles.
    pub vehicles: Vec<Arc<Vehicle>>,
    /// All actors, one per vehicle.
    pub actors: Vec<Arc<Actor>>,
    /// Distinct type keys ordered by slot.
    pub type_keys: Vec<TypeKey>,
    /// One actor per type key ordered by slot.
    pub representatives: Vec<Arc<Actor>>,
}

impl Fleet {
    /// Creates a new instance of `Fleet` where every vehicle is driven by the given driver.
    pub fn new(driver: Arc<Driver>, vehicles: Vec<Arc<Vehicle>>) -> Fleet {
        let mut slots: FxHashMap<TypeKey, usize> = FxHashMap::default();
        let mut type_keys = vec![];

        let actors = vehicles
            .iter()
            .map(|vehicle| {
                let type_key = TypeKey::new(vehicle);
                let slot = *slots.entry(type_key.clone()).or_insert_with(|| {
                    type_keys.push(type_key.clone());
                    type_keys.len() - 1
                });

                Arc::new(Actor { vehicle: vehicle.clone(), driver: driver.clone(), type_key, slot, is_penalty: false })
            })
            .collect::<Vec<_>>();

        let representatives = (0..type_keys.len())
            .filter_map(|slot| actors.iter().find(|actor| actor.slot == slot).cloned())
            .collect();

        Fleet { drivers: vec![driver], vehicles, actors, type_keys, representatives }
    }

    /// Creates one penalty actor per type key with all costs multiplied by given factor.
    pub fn create_penalty_actors(&self, factor: f64) -> Vec<Arc<Actor>> {
        self.representatives
            .iter()
            .map(|actor| {
                let vehicle_type = VehicleType {
                    costs: actor.vehicle.costs().scale(factor),
                    ..actor.vehicle.vehicle_type.as_ref().clone()
                };
                let vehicle = Vehicle {
                    id: format!("{}_penalty", actor.type_key.type_id),
                    vehicle_type: Arc::new(vehicle_type),
                    ..actor.vehicle.as_ref().clone()
                };

                Arc::new(Actor {
                    vehicle: Arc::new(vehicle),
                    driver: actor.driver.clone(),
                    type_key: actor.type_key.clone(),
                    slot: actor.slot,
                    is_penalty: true,
                })
            })
            .collect()
    }
}

/// Specifies how many vehicles of each type can be used.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FleetSize {
    /// Every vehicle can be used at most once.
    Finite,
    /// Every vehicle type can be used unlimited amount of times.
    Infinite,
}
