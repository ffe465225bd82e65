use crate::models::common::*;
use crate::models::problem::{Job, JobPlace, Service, Shipment};
use std::sync::Arc;

pub const DEFAULT_JOB_LOCATION: Location = 0;
pub const DEFAULT_JOB_DURATION: Duration = 0.;
pub const DEFAULT_JOB_TIME_WINDOW: TimeWindow = TimeWindow { start: 0., end: 1000. };

pub fn test_place(location: Location) -> JobPlace {
    JobPlace { location, duration: DEFAULT_JOB_DURATION, time: DEFAULT_JOB_TIME_WINDOW }
}

pub fn test_service(id: &str, location: Location) -> Job {
    ServiceBuilder::default().id(id).location(location).build()
}

pub fn test_service_with_demand(id: &str, location: Location, demand: Demand) -> Job {
    ServiceBuilder::default().id(id).location(location).demand(demand).build()
}

pub fn test_shipment(id: &str, pickup: Location, delivery: Location, demand: Demand) -> Job {
    Job::Shipment(Arc::new(Shipment {
        id: id.to_string(),
        pickup: test_place(pickup),
        delivery: test_place(delivery),
        demand,
    }))
}

pub fn get_job_ids(jobs: &[Job]) -> Vec<String> {
    jobs.iter().map(|job| job.id().to_string()).collect()
}

pub struct ServiceBuilder(Service);

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self(Service { id: "service".to_string(), place: test_place(DEFAULT_JOB_LOCATION), demand: 0 })
    }
}

impl ServiceBuilder {
    pub fn id(mut self, id: &str) -> Self {
        self.0.id = id.to_string();
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.0.place.location = location;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.0.place.duration = duration;
        self
    }

    pub fn time(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.0.place.time = TimeWindow::new(start, end);
        self
    }

    pub fn demand(mut self, demand: Demand) -> Self {
        self.0.demand = demand;
        self
    }

    pub fn build(self) -> Job {
        Job::Service(Arc::new(self.0))
    }
}
