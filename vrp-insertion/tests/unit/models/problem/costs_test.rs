use super::*;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::test_actor;

#[test]
fn can_create_matrix_transport_cost() {
    let matrix = MatrixTransportCost::new(vec![0., 1., 2., 0.], vec![0., 3., 4., 0.]).expect("valid matrix");

    assert_eq!(matrix.size(), 2);
    assert_eq!(matrix.locations(), Some(2));
    assert_eq!(matrix.duration_approx(0, 1), 1.);
    assert_eq!(matrix.duration_approx(1, 0), 2.);
    assert_eq!(matrix.distance_approx(0, 1), 3.);
    assert_eq!(matrix.distance(test_actor().as_ref(), 1, 0, TravelTime::Departure(0.)), 4.);
}

parameterized_test! {can_reject_invalid_matrix, (durations, distances), {
    assert!(MatrixTransportCost::new(durations, distances).is_err());
}}

can_reject_invalid_matrix! {
    case01_different_size: (vec![0., 1., 1., 0.], vec![0., 1.]),
    case02_not_square: (vec![0., 1., 1.], vec![0., 1., 1.]),
    case03_negative_duration: (vec![0., -1., 1., 0.], vec![0., 1., 1., 0.]),
    case04_infinite_duration: (vec![0., f64::INFINITY, 1., 0.], vec![0., 1., 1., 0.]),
}

#[test]
fn can_create_matrix_from_coordinates() {
    let coordinates = vec![Coordinate::new(0., 0.), Coordinate::new(3., 4.)];

    let matrix = MatrixTransportCost::from_coordinates(coordinates.as_slice()).expect("valid matrix");

    assert_eq!(matrix.distance_approx(0, 1), 5.);
    assert_eq!(matrix.duration_approx(1, 0), 5.);
    assert_eq!(matrix.distance_approx(1, 1), 0.);
}

#[test]
fn can_calculate_transport_cost_using_actor_costs() {
    let actor = test_actor();

    let cost = TestTransportCost::default().cost(actor.as_ref(), 2, 7, TravelTime::Departure(0.));

    assert_eq!(cost, 5.);
}

parameterized_test! {can_estimate_activity_departure_and_arrival, (time, duration, arrival, departure, latest), {
    let actor = test_actor();
    let job = ServiceBuilder::default().time(time.0, time.1).duration(duration).build();
    let activity = crate::models::solution::Activity::new_job_activities(&job).remove(0);
    let cost = SimpleActivityCost::default();

    assert_eq!(cost.estimate_departure(actor.as_ref(), &activity, arrival), departure);
    assert_eq!(cost.estimate_arrival(actor.as_ref(), &activity, departure + 100.), latest);
}}

can_estimate_activity_departure_and_arrival! {
    case01_waiting: ((10., 20.), 5., 0., 15., 20.),
    case02_no_waiting: ((10., 20.), 5., 12., 17., 20.),
    case03_late_departure: ((10., 200.), 5., 12., 17., 112.),
}

#[test]
fn can_check_distance_neighbourhood() {
    let neighbourhood = DistanceNeighbourhood::new(TestTransportCost::new_shared(), 3.);

    assert!(neighbourhood.are_neighbours(1, 4));
    assert!(neighbourhood.are_neighbours(4, 1));
    assert!(!neighbourhood.are_neighbours(1, 5));
}
