use super::*;
use crate::helpers::construction::create_route_ctx;
use crate::helpers::models::domain::create_test_problem;
use crate::helpers::models::problem::*;
use crate::models::Problem;

fn create_mixed_problem() -> Problem {
    create_test_problem(
        vec![
            test_service_with_demand("job1", 5, -3),
            test_service_with_demand("job2", 10, 2),
            test_service_with_demand("job3", 3, -1),
            test_shipment("job4", 4, 6, 5),
        ],
        vec![test_vehicle("v1"), test_vehicle_with_capacity("v2", 5)],
    )
}

#[test]
fn can_update_load_states() {
    let problem = create_mixed_problem();
    let route_ctx = create_route_ctx(&problem, "v1", &["job1", "job2", "job3"]);
    let state = route_ctx.state();

    let loads = (0..5).map(|idx| state.get_load_at(idx).unwrap()).collect::<Vec<_>>();
    let past = (0..5).map(|idx| state.get_past_max_load_at(idx).unwrap()).collect::<Vec<_>>();
    let future = (0..5).map(|idx| state.get_future_max_load_at(idx).unwrap()).collect::<Vec<_>>();

    assert_eq!(state.get_load_at_beginning(), Some(4));
    assert_eq!(state.get_load_at_end(), Some(2));
    assert_eq!(state.get_max_load(), Some(4));
    assert_eq!(loads, vec![4, 1, 3, 2, 2]);
    assert_eq!(past, vec![4, 4, 4, 4, 4]);
    assert_eq!(future, vec![4, 3, 3, 2, 2]);
}

#[test]
fn can_carry_shipment_load_only_between_its_activities() {
    let problem = create_mixed_problem();
    let route_ctx = create_route_ctx(&problem, "v1", &["job4", "job2"]);
    let state = route_ctx.state();

    let loads = (0..5).map(|idx| state.get_load_at(idx).unwrap()).collect::<Vec<_>>();

    assert_eq!(state.get_load_at_beginning(), Some(0));
    assert_eq!(loads, vec![0, 5, 0, 2, 2]);
    assert_eq!(state.get_max_load(), Some(5));
}

#[test]
fn can_update_cost_and_statistics() {
    let problem = create_mixed_problem();
    let route_ctx = create_route_ctx(&problem, "v1", &["job1", "job2", "job3"]);
    let state = route_ctx.state();

    let costs = (0..5).map(|idx| state.get_cumulative_cost_at(idx).unwrap()).collect::<Vec<_>>();

    assert_eq!(costs, vec![0., 5., 10., 17., 20.]);
    assert_eq!(state.get_total_cost(), Some(20.));
    assert_eq!(state.get_total_distance(), Some(20.));
    assert_eq!(state.get_total_duration(), Some(20.));
}

#[test]
fn can_update_latest_start_for_every_slot() {
    let problem = test_problem_with_shifts();
    let route_ctx = create_route_ctx(&problem, "v1", &["job1", "job2"]);
    let state = route_ctx.state();

    let latest = |slot: usize| (1..4).map(|idx| state.get_latest_start_at(idx, slot).unwrap()).collect::<Vec<_>>();

    assert_eq!(latest(0), vec![85., 90., 100.]);
    assert_eq!(latest(1), vec![35., 40., 50.]);
    assert_eq!(state.get_latest_start_at(0, 0), None);
}

#[test]
fn can_limit_latest_start_by_time_window() {
    let problem = create_test_problem(
        vec![ServiceBuilder::default().id("job1").location(5).time(0., 30.).duration(10.).build()],
        vec![test_vehicle("v1")],
    );
    let route_ctx = create_route_ctx(&problem, "v1", &["job1"]);

    assert_eq!(route_ctx.state().get_latest_start_at(1, 0), Some(30.));
}

#[test]
fn can_keep_latest_start_monotone() {
    let problem = create_test_problem(
        vec![
            ServiceBuilder::default().id("job1").location(2).time(0., 500.).duration(3.).build(),
            ServiceBuilder::default().id("job2").location(8).time(0., 50.).duration(1.).build(),
            ServiceBuilder::default().id("job3").location(4).time(0., 900.).duration(2.).build(),
        ],
        vec![test_vehicle("v1")],
    );
    let route_ctx = create_route_ctx(&problem, "v1", &["job1", "job2", "job3"]);
    let state = route_ctx.state();

    (1..4).for_each(|idx| {
        let current = state.get_latest_start_at(idx, 0).unwrap();
        let next = state.get_latest_start_at(idx + 1, 0).unwrap();
        let activity = route_ctx.route().tour.get(idx).unwrap();
        let next_location = route_ctx.route().tour.get(idx + 1).unwrap().place.location;

        assert!(current + activity.place.duration + fake_routing(activity.place.location, next_location) <= next);
    });
}

fn test_problem_with_shifts() -> Problem {
    create_test_problem(
        vec![test_service("job1", 5), test_service("job2", 10)],
        vec![
            VehicleBuilder::default().id("v1").time(0., 100.).build(),
            VehicleBuilder::default().id("v2").time(0., 50.).build(),
        ],
    )
}
