use crate::helpers::models::problem::*;
use crate::models::common::Location;
use crate::models::problem::Actor;
use crate::models::solution::{Activity, Route};
use std::sync::Arc;

pub fn test_actor() -> Arc<Actor> {
    test_fleet().actors[0].clone()
}

pub fn test_activity_with_location(location: Location) -> Activity {
    Activity::new_job_activities(&test_service("activity", location)).remove(0)
}

/// Creates a route of a default actor with services at given locations, ids are `job{index}`.
pub fn create_route_with_locations(locations: &[Location]) -> Route {
    let mut route = Route::new(test_actor());
    locations.iter().enumerate().for_each(|(idx, location)| {
        let job = test_service(format!("job{idx}").as_str(), *location);
        Activity::new_job_activities(&job).into_iter().for_each(|activity| {
            route.tour.insert_last(activity);
        });
    });

    route
}

/// Returns job ids of route activities in their tour order, sentinels are skipped.
pub fn get_activity_ids(route: &Route) -> Vec<String> {
    route.tour.all_activities().filter_map(|activity| activity.job()).map(|job| job.id().to_string()).collect()
}
