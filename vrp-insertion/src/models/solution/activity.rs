use crate::models::common::*;
use crate::models::problem::{Actor, Job, JobPlace, Service, Shipment};
use std::sync::Arc;

/// Specifies activity place.
#[derive(Clone, Debug)]
pub struct Place {
    /// Location where activity is performed.
    pub location: Location,
    /// Specifies activity's duration.
    pub duration: Duration,
    /// Specifies activity's time window: an interval when activity is allowed to be started.
    pub time: TimeWindow,
}

impl From<&JobPlace> for Place {
    fn from(place: &JobPlace) -> Self {
        Self { location: place.location, duration: place.duration, time: place.time.clone() }
    }
}

/// Specifies what is done at the stop.
#[derive(Clone, Debug)]
pub enum ActivityKind {
    /// Route start sentinel.
    Start,
    /// Route end sentinel.
    End,
    /// A single stop job.
    Service(Arc<Service>),
    /// A pickup part of the shipment.
    Pickup(Arc<Shipment>),
    /// A delivery part of the shipment.
    Delivery(Arc<Shipment>),
}

/// Represents activity which is needed to be performed.
#[derive(Clone, Debug)]
pub struct Activity {
    /// What is done.
    pub kind: ActivityKind,
    /// Specifies activity details.
    pub place: Place,
    /// Signed load change caused by the activity.
    pub demand: Demand,
    /// Specifies activity schedule: actual arrival and departure time.
    pub schedule: Schedule,
}

impl Activity {
    /// Creates a start sentinel for given actor.
    pub fn new_start(actor: &Actor) -> Self {
        let time = actor.vehicle.time.clone();
        let departure = time.start;

        Self {
            kind: ActivityKind::Start,
            place: Place { location: actor.vehicle.start, duration: 0., time },
            demand: 0,
            schedule: Schedule::new(departure, departure),
        }
    }

    /// Creates an end sentinel for given actor.
    pub fn new_end(actor: &Actor) -> Self {
        let time = actor.vehicle.time.clone();
        let arrival = time.start;

        Self {
            kind: ActivityKind::End,
            place: Place { location: actor.vehicle.end, duration: 0., time },
            demand: 0,
            schedule: Schedule::new(arrival, arrival),
        }
    }

    /// Creates activities for all places of the job in their service order.
    pub fn new_job_activities(job: &Job) -> Vec<Activity> {
        match job {
            Job::Service(service) => vec![Self::new_job_activity(
                ActivityKind::Service(service.clone()),
                &service.place,
                service.demand,
            )],
            Job::Shipment(shipment) => vec![
                Self::new_job_activity(ActivityKind::Pickup(shipment.clone()), &shipment.pickup, shipment.demand),
                Self::new_job_activity(ActivityKind::Delivery(shipment.clone()), &shipment.delivery, -shipment.demand),
            ],
        }
    }

    fn new_job_activity(kind: ActivityKind, place: &JobPlace, demand: Demand) -> Self {
        let start = place.time.start;
        Self { kind, place: place.into(), demand, schedule: Schedule::new(start, start) }
    }

    /// Returns job if activity is a job activity.
    pub fn job(&self) -> Option<Job> {
        match &self.kind {
            ActivityKind::Start | ActivityKind::End => None,
            ActivityKind::Service(service) => Some(Job::Service(service.clone())),
            ActivityKind::Pickup(shipment) | ActivityKind::Delivery(shipment) => Some(Job::Shipment(shipment.clone())),
        }
    }

    /// Checks whether activity belongs to given job.
    pub fn has_same_job(&self, job: &Job) -> bool {
        match (&self.kind, job) {
            (ActivityKind::Service(a), Job::Service(b)) => Arc::ptr_eq(a, b),
            (ActivityKind::Pickup(a) | ActivityKind::Delivery(a), Job::Shipment(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns true if activity is a route sentinel.
    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, ActivityKind::Start | ActivityKind::End)
    }
}
