#[cfg(test)]
#[path = "../../../tests/unit/models/problem/jobs_test.rs"]
mod jobs_test;

use crate::models::common::*;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents a place where some work has to be done.
#[derive(Clone, Debug)]
pub struct JobPlace {
    /// Location in routing matrix.
    pub location: Location,
    /// Operation duration.
    pub duration: Duration,
    /// Time window when operation can be started.
    pub time: TimeWindow,
}

/// Represents a job which has to be done at a single place.
#[derive(Debug)]
pub struct Service {
    /// Unique job id.
    pub id: String,
    /// A place where the work is done.
    pub place: JobPlace,
    /// A signed demand: positive is picked up and brought to the route end,
    /// negative is loaded at the route start and dropped here.
    pub demand: Demand,
}

/// Represents a job which consists of a pickup and a paired delivery served by the same route.
#[derive(Debug)]
pub struct Shipment {
    /// Unique job id.
    pub id: String,
    /// A place where goods are picked up.
    pub pickup: JobPlace,
    /// A place where goods are delivered.
    pub delivery: JobPlace,
    /// A non-negative amount of goods carried from pickup to delivery.
    pub demand: Demand,
}

/// Represents a job variant.
#[derive(Clone)]
pub enum Job {
    /// A single stop job.
    Service(Arc<Service>),
    /// A pickup and delivery job.
    Shipment(Arc<Shipment>),
}

impl Job {
    /// Returns job id.
    pub fn id(&self) -> &str {
        match self {
            Job::Service(service) => service.id.as_str(),
            Job::Shipment(shipment) => shipment.id.as_str(),
        }
    }

    /// Returns all places of the job in their service order.
    pub fn places(&self) -> Box<dyn Iterator<Item = &JobPlace> + '_> {
        match self {
            Job::Service(service) => Box::new(std::iter::once(&service.place)),
            Job::Shipment(shipment) => Box::new([&shipment.pickup, &shipment.delivery].into_iter()),
        }
    }

    /// Returns absolute demand of the job.
    pub fn size(&self) -> Demand {
        match self {
            Job::Service(service) => service.demand.abs(),
            Job::Shipment(shipment) => shipment.demand.abs(),
        }
    }

    /// Returns service if the job is a service.
    pub fn as_service(&self) -> Option<&Arc<Service>> {
        match self {
            Job::Service(service) => Some(service),
            Job::Shipment(_) => None,
        }
    }

    /// Returns shipment if the job is a shipment.
    pub fn as_shipment(&self) -> Option<&Arc<Shipment>> {
        match self {
            Job::Service(_) => None,
            Job::Shipment(shipment) => Some(shipment),
        }
    }

    fn as_ptr(&self) -> *const () {
        match self {
            Job::Service(service) => Arc::as_ptr(service) as *const (),
            Job::Shipment(shipment) => Arc::as_ptr(shipment) as *const (),
        }
    }
}

impl PartialEq<Job> for Job {
    fn eq(&self, other: &Job) -> bool {
        std::ptr::eq(self.as_ptr(), other.as_ptr())
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ptr().hash(state);
    }
}

impl Debug for Job {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Job::Service(service) => f.debug_struct("Service").field("id", &service.id).finish(),
            Job::Shipment(shipment) => f.debug_struct("Shipment").field("id", &shipment.id).finish(),
        }
    }
}

/// Stores all jobs of the problem and gives them a dense index.
pub struct Jobs {
    jobs: Vec<Job>,
    index: FxHashMap<Job, usize>,
}

impl Jobs {
    /// Creates a new instance of `Jobs`.
    pub fn new(jobs: Vec<Job>) -> Self {
        let index = jobs.iter().cloned().enumerate().map(|(idx, job)| (job, idx)).collect();

        Self { jobs, index }
    }

    /// Returns all jobs in original order.
    pub fn all(&self) -> &[Job] {
        self.jobs.as_slice()
    }

    /// Returns amount of jobs.
    pub fn size(&self) -> usize {
        self.jobs.len()
    }

    /// Returns job by its dense index.
    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Returns dense index of given job.
    pub fn index_of(&self, job: &Job) -> Option<usize> {
        self.index.get(job).copied()
    }
}
