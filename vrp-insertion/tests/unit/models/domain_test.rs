use super::*;
use crate::helpers::models::domain::*;
use crate::helpers::models::problem::*;

fn get_build_error(builder: ProblemBuilder) -> String {
    match builder.build() {
        Ok(_) => unreachable!("problem should not be built"),
        Err(err) => err.to_string(),
    }
}

#[test]
fn can_build_problem_with_defaults() {
    let problem = create_test_problem(vec![test_service("job1", 1)], vec![test_vehicle("v1")]);

    assert_eq!(problem.jobs.size(), 1);
    assert_eq!(problem.fleet.actors.len(), 1);
    assert_eq!(problem.fleet_size, FleetSize::Finite);
    assert!(problem.penalty_factor.is_none());
    assert!(problem.neighbourhood.is_none());
}

#[test]
fn can_detect_missing_transport() {
    let builder = ProblemBuilder::default().add_vehicles(vec![test_vehicle("v1")]);

    assert_eq!(get_build_error(builder), "transport costs are not set");
}

parameterized_test! {can_validate_problem, (jobs, vehicles, expected), {
    let (jobs, vehicles): (Vec<Job>, Vec<Vehicle>) = (jobs, vehicles);
    let builder = test_problem_builder().add_jobs(jobs).add_vehicles(vehicles);

    assert_eq!(get_build_error(builder), expected);
}}

can_validate_problem! {
    case01_no_vehicles: (vec![test_service("job1", 1)], vec![], "fleet has no vehicles"),
    case02_duplicate_vehicle: (vec![], vec![test_vehicle("v1"), test_vehicle("v1")], "duplicate vehicle id: 'v1'"),
    case03_negative_capacity: (
        vec![], vec![test_vehicle_with_capacity("v1", -1)], "vehicle 'v1' has negative capacity"
    ),
    case04_invalid_shift: (
        vec![],
        vec![VehicleBuilder::default().id("v1").time(10., 5.).build()],
        "vehicle 'v1' has invalid operating time window"
    ),
    case05_duplicate_job: (
        vec![test_service("job1", 1), test_service("job1", 2)], vec![test_vehicle("v1")], "duplicate job id: 'job1'"
    ),
    case06_invalid_job_time: (
        vec![ServiceBuilder::default().id("job1").time(10., 0.).build()],
        vec![test_vehicle("v1")],
        "job 'job1' has invalid time window"
    ),
    case07_negative_duration: (
        vec![ServiceBuilder::default().id("job1").duration(-1.).build()],
        vec![test_vehicle("v1")],
        "job 'job1' has negative duration"
    ),
    case08_negative_shipment_demand: (
        vec![test_shipment("job1", 1, 2, -1)], vec![test_vehicle("v1")], "shipment 'job1' has negative demand"
    ),
}

#[test]
fn can_validate_job_locations_against_coordinates() {
    let builder = test_problem_builder()
        .add_jobs(vec![test_service("job1", 1), test_service("job2", 5)])
        .add_vehicles(vec![test_vehicle("v1")])
        .with_coordinates(vec![Coordinate::new(0., 0.), Coordinate::new(1., 1.)]);

    assert_eq!(get_build_error(builder), "job 'job2' has location outside of 2 known coordinates");
}

parameterized_test! {can_validate_locations_against_routing_matrix, (job_location, vehicle_end, expected), {
    let matrix = MatrixTransportCost::new(vec![0.; 9], vec![0.; 9]).expect("valid matrix");
    let builder = ProblemBuilder::default()
        .add_jobs(vec![test_service("job1", 1), test_service("job2", job_location)])
        .add_vehicles(vec![VehicleBuilder::default().id("v1").end(vehicle_end).build()])
        .with_transport_cost(Arc::new(matrix));

    assert_eq!(builder.build().err().map(|err| err.to_string()), expected.map(|err: &str| err.to_string()));
}}

can_validate_locations_against_routing_matrix! {
    case01_all_known: (2, 2, None),
    case02_job_outside: (3, 0, Some("job 'job2' has location outside of routing matrix of size 3")),
    case03_vehicle_outside: (2, 5, Some("vehicle 'v1' has location outside of routing matrix of size 3")),
}

#[test]
fn can_validate_penalty_factor() {
    let builder = test_problem_builder().add_vehicles(vec![test_vehicle("v1")]).with_penalty_vehicles(0.5);

    assert_eq!(get_build_error(builder), "penalty factor must not be less than one");
}

struct FailAll {}

impl HardRouteConstraint for FailAll {
    fn evaluate_job(&self, _: &crate::construction::heuristics::InsertionContext) -> Option<RouteConstraintViolation> {
        Some(RouteConstraintViolation { code: 42 })
    }
}

#[test]
fn can_append_custom_constraints_after_defaults() {
    let problem = test_problem_builder()
        .add_jobs(vec![test_service("job1", 1)])
        .add_vehicles(vec![test_vehicle("v1")])
        .add_hard_route_constraint(Arc::new(FailAll {}))
        .build()
        .expect("cannot build problem");
    let route_ctx = crate::construction::heuristics::RouteContext::new_prototype(problem.fleet.actors[0].clone());
    let job = problem.jobs.all()[0].clone();
    let ctx = crate::construction::heuristics::InsertionContext::new(&route_ctx, &job, &problem.fleet.actors[0]);

    let violation = problem.constraint.evaluate_hard_route(&ctx);

    assert_eq!(violation, Some(RouteConstraintViolation { code: 42 }));
}
