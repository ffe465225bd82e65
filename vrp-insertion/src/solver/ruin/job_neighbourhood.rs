#[cfg(test)]
#[path = "../../../tests/unit/solver/ruin/job_neighbourhood_test.rs"]
mod job_neighbourhood_test;

use crate::models::common::{Coordinate, Distance, Location};
use crate::models::problem::{Job, TransportCost};
use crate::models::Problem;
use crate::utils::{compare_floats, parallel_collect};
use rustc_hash::FxHashMap;

/// Keeps for every job all other jobs ordered by ascending distance. Built once per problem.
pub struct JobNeighbourhood {
    index: FxHashMap<Job, Vec<(Job, Distance)>>,
}

impl JobNeighbourhood {
    /// Creates a new instance of `JobNeighbourhood`. When `limit` is set, only the given amount of
    /// the closest neighbours is kept per job.
    pub fn new(problem: &Problem, limit: Option<usize>) -> Self {
        let jobs = problem.jobs.all();
        let coordinates = problem.coordinates.as_ref().map(|coordinates| coordinates.as_slice());
        let transport = problem.transport.as_ref();

        let neighbours = parallel_collect(jobs, |job| {
            let mut distances = jobs
                .iter()
                .filter(|other| *other != job)
                .map(|other| (other.clone(), get_distance_between_jobs(transport, coordinates, job, other)))
                .collect::<Vec<_>>();

            distances.sort_by(|(_, a), (_, b)| compare_floats(*a, *b));
            if let Some(limit) = limit {
                distances.truncate(limit);
            }

            distances
        });

        Self { index: jobs.iter().cloned().zip(neighbours).collect() }
    }

    /// Returns neighbours of the job ordered by ascending distance.
    pub fn neighbours<'a>(&'a self, job: &Job) -> impl Iterator<Item = &'a (Job, Distance)> + 'a {
        self.index.get(job).into_iter().flat_map(|neighbours| neighbours.iter())
    }

    /// Returns distance between two jobs, if it is kept in the index.
    pub fn distance(&self, from: &Job, to: &Job) -> Option<Distance> {
        self.neighbours(from).find(|(job, _)| job == to).map(|(_, distance)| *distance)
    }
}

/// Returns minimal distance between places of two jobs.
fn get_distance_between_jobs(
    transport: &dyn TransportCost,
    coordinates: Option<&[Coordinate]>,
    from: &Job,
    to: &Job,
) -> Distance {
    from.places()
        .flat_map(|from| to.places().map(move |to| (from.location, to.location)))
        .map(|(from, to)| get_distance_between_locations(transport, coordinates, from, to))
        .min_by(|a, b| compare_floats(*a, *b))
        .unwrap_or(Distance::MAX)
}

/// Returns routing distance or straight line distance between coordinates if routing one is unknown.
fn get_distance_between_locations(
    transport: &dyn TransportCost,
    coordinates: Option<&[Coordinate]>,
    from: Location,
    to: Location,
) -> Distance {
    let distance = transport.distance_approx(from, to);
    if distance.is_finite() && distance >= 0. {
        return distance;
    }

    coordinates
        .and_then(|coordinates| coordinates.get(from).zip(coordinates.get(to)))
        .map_or(Distance::MAX, |(from, to)| from.distance_to(to))
}
