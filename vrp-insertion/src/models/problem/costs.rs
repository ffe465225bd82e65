#[cfg(test)]
#[path = "../../../tests/unit/models/problem/costs_test.rs"]
mod costs_test;

use crate::models::common::*;
use crate::models::problem::Actor;
use crate::models::solution::Activity;
use crate::utils::GenericResult;
use std::sync::Arc;

/// Specifies travel time type.
#[derive(Copy, Clone, Debug)]
pub enum TravelTime {
    /// Arrival time type.
    Arrival(Timestamp),
    /// Departure time type.
    Departure(Timestamp),
}

/// Provides the way to get cost information for specific activities done by specific actor.
pub trait ActivityCost: Send + Sync {
    /// Returns cost to perform activity.
    fn cost(&self, actor: &Actor, activity: &Activity, arrival: Timestamp) -> Cost {
        let waiting = if activity.place.time.start > arrival { activity.place.time.start - arrival } else { 0. };
        let service = activity.place.duration;

        waiting * (actor.driver.costs.per_waiting_time + actor.vehicle.costs().per_waiting_time)
            + service * (actor.driver.costs.per_service_time + actor.vehicle.costs().per_service_time)
    }

    /// Estimates departure time for activity and actor at given arrival time.
    fn estimate_departure(&self, actor: &Actor, activity: &Activity, arrival: Timestamp) -> Timestamp;

    /// Estimates the latest operation start for activity and actor at given latest departure time.
    fn estimate_arrival(&self, actor: &Actor, activity: &Activity, departure: Timestamp) -> Timestamp;
}

/// An actor independent activity costs.
#[derive(Default)]
pub struct SimpleActivityCost {}

impl ActivityCost for SimpleActivityCost {
    fn estimate_departure(&self, _: &Actor, activity: &Activity, arrival: Timestamp) -> Timestamp {
        arrival.max(activity.place.time.start) + activity.place.duration
    }

    fn estimate_arrival(&self, _: &Actor, activity: &Activity, departure: Timestamp) -> Timestamp {
        activity.place.time.end.min(departure - activity.place.duration)
    }
}

/// Provides the way to get routing information for specific locations and actor.
pub trait TransportCost: Send + Sync {
    /// Returns time-dependent transport cost between two locations for given actor.
    fn cost(&self, actor: &Actor, from: Location, to: Location, travel_time: TravelTime) -> Cost {
        let distance = self.distance(actor, from, to, travel_time);
        let duration = self.duration(actor, from, to, travel_time);

        distance * (actor.driver.costs.per_distance + actor.vehicle.costs().per_distance)
            + duration * (actor.driver.costs.per_driving_time + actor.vehicle.costs().per_driving_time)
    }

    /// Returns time-independent travel duration between locations.
    fn duration_approx(&self, from: Location, to: Location) -> Duration;

    /// Returns time-independent travel distance between locations. A negative or non-finite value
    /// means that distance is unknown.
    fn distance_approx(&self, from: Location, to: Location) -> Distance;

    /// Returns time-dependent travel duration between locations specific for given actor.
    fn duration(&self, actor: &Actor, from: Location, to: Location, travel_time: TravelTime) -> Duration;

    /// Returns time-dependent travel distance between locations specific for given actor.
    fn distance(&self, actor: &Actor, from: Location, to: Location, travel_time: TravelTime) -> Distance;

    /// Returns amount of locations the routing data is limited to, if any.
    fn locations(&self) -> Option<usize> {
        None
    }
}

/// A time agnostic matrix routing costs.
pub struct MatrixTransportCost {
    durations: Vec<Duration>,
    distances: Vec<Distance>,
    size: usize,
}

impl MatrixTransportCost {
    /// Creates an instance of `MatrixTransportCost` from row-major square matrices.
    pub fn new(durations: Vec<Duration>, distances: Vec<Distance>) -> GenericResult<Self> {
        if durations.len() != distances.len() {
            return Err("distance and duration collections have different length".into());
        }

        let size = (durations.len() as f64).sqrt().round() as usize;
        if size * size != durations.len() {
            return Err(format!("matrix of {} elements is not square", durations.len()).into());
        }

        if durations.iter().any(|duration| *duration < 0. || !duration.is_finite()) {
            return Err("durations must be non-negative finite values".into());
        }

        Ok(Self { durations, distances, size })
    }

    /// Creates an instance of `MatrixTransportCost` using straight line distances between coordinates.
    /// Durations are equal to distances.
    pub fn from_coordinates(coordinates: &[Coordinate]) -> GenericResult<Self> {
        let distances = coordinates
            .iter()
            .flat_map(|from| coordinates.iter().map(move |to| from.distance_to(to)))
            .collect::<Vec<_>>();

        Self::new(distances.clone(), distances)
    }

    /// Returns amount of locations in the matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl TransportCost for MatrixTransportCost {
    fn duration_approx(&self, from: Location, to: Location) -> Duration {
        self.durations[from * self.size + to]
    }

    fn distance_approx(&self, from: Location, to: Location) -> Distance {
        self.distances[from * self.size + to]
    }

    fn duration(&self, _: &Actor, from: Location, to: Location, _: TravelTime) -> Duration {
        self.duration_approx(from, to)
    }

    fn distance(&self, _: &Actor, from: Location, to: Location, _: TravelTime) -> Distance {
        self.distance_approx(from, to)
    }

    fn locations(&self) -> Option<usize> {
        Some(self.size)
    }
}

/// Checks whether two locations are close enough to be evaluated as adjacent stops.
pub trait Neighbourhood: Send + Sync {
    /// Returns true if locations are neighbours.
    fn are_neighbours(&self, from: Location, to: Location) -> bool;
}

/// Considers locations as neighbours when approximate distance between them does not exceed a threshold.
pub struct DistanceNeighbourhood {
    transport: Arc<dyn TransportCost>,
    threshold: Distance,
}

impl DistanceNeighbourhood {
    /// Creates a new instance of `DistanceNeighbourhood`.
    pub fn new(transport: Arc<dyn TransportCost>, threshold: Distance) -> Self {
        Self { transport, threshold }
    }
}

impl Neighbourhood for DistanceNeighbourhood {
    fn are_neighbours(&self, from: Location, to: Location) -> bool {
        let distance = self.transport.distance_approx(from, to);
        distance >= 0. && distance <= self.threshold
    }
}
