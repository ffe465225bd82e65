use super::*;
use crate::construction::heuristics::RouteContext;
use crate::helpers::construction::create_route_ctx;
use crate::helpers::models::domain::create_test_problem;
use crate::helpers::models::problem::*;
use crate::models::solution::Activity;

fn create_route_with_loads() -> RouteContext {
    // loads: [4, 1, 3, 2, 2]
    let problem = create_test_problem(
        vec![
            test_service_with_demand("job1", 5, -3),
            test_service_with_demand("job2", 10, 2),
            test_service_with_demand("job3", 3, -1),
        ],
        vec![test_vehicle("v1")],
    );

    create_route_ctx(&problem, "v1", &["job1", "job2", "job3"])
}

fn evaluate_activity(job: &Job, target_idx: usize, index: usize, related: Option<usize>) -> ConstraintStatus {
    let route_ctx = create_route_with_loads();
    let actor = route_ctx.route().actor.clone();
    let ctx = InsertionContext::new(&route_ctx, job, &actor);
    let target = Activity::new_job_activities(job).remove(target_idx);
    let activity_ctx = ActivityContext {
        index,
        prev: ctx.activity(index),
        target: &target,
        next: ctx.activity(index + 1),
        prev_departure: 0.,
        related,
    };

    CapacityConstraint::default().evaluate_activity(&ctx, &activity_ctx)
}

parameterized_test! {can_evaluate_service_job_on_route_level, (demand, is_violated), {
    let route_ctx = create_route_with_loads();
    let actor = route_ctx.route().actor.clone();
    let job = test_service_with_demand("job", 0, demand);
    let ctx = InsertionContext::new(&route_ctx, &job, &actor);

    let result = CapacityConstraint::default().evaluate_job(&ctx);

    assert_eq!(result.is_some(), is_violated);
}}

can_evaluate_service_job_on_route_level! {
    case01_delivery_fits: (-6, false),
    case02_delivery_exceeds: (-7, true),
    case03_pickup_fits: (8, false),
    case04_pickup_exceeds: (9, true),
}

parameterized_test! {can_evaluate_shipment_job_on_route_level, (demand, is_violated), {
    let route_ctx = create_route_with_loads();
    let actor = route_ctx.route().actor.clone();
    let job = test_shipment("job", 0, 1, demand);
    let ctx = InsertionContext::new(&route_ctx, &job, &actor);

    let result = CapacityConstraint::default().evaluate_job(&ctx);

    let expected = is_violated.then_some(RouteConstraintViolation { code: CAPACITY_CONSTRAINT_CODE });
    assert_eq!(result, expected);
}}

can_evaluate_shipment_job_on_route_level! {
    case01_fits: (10, false),
    case02_exceeds: (11, true),
}

parameterized_test! {can_evaluate_service_activity, (demand, index, expected), {
    let job = test_service_with_demand("job", 0, demand);

    assert_eq!(evaluate_activity(&job, 0, index, None), expected);
}}

can_evaluate_service_activity! {
    case01_pickup_before_peak: (7, 0, ConstraintStatus::Rejected(CAPACITY_CONSTRAINT_CODE)),
    case02_pickup_after_peak: (7, 1, ConstraintStatus::Fulfilled),
    case03_pickup_at_end: (7, 3, ConstraintStatus::Fulfilled),
    case04_delivery_fits: (-6, 2, ConstraintStatus::Fulfilled),
    case05_delivery_exceeds: (-7, 0, ConstraintStatus::RejectedPrune(CAPACITY_CONSTRAINT_CODE)),
    case06_delivery_exceeds_later: (-7, 3, ConstraintStatus::RejectedPrune(CAPACITY_CONSTRAINT_CODE)),
}

parameterized_test! {can_evaluate_shipment_activities, (demand, target_idx, index, related, expected), {
    let job = test_shipment("job", 0, 1, demand);

    assert_eq!(evaluate_activity(&job, target_idx, index, related), expected);
}}

can_evaluate_shipment_activities! {
    case01_pickup_overloaded: (7, 0, 0, None, ConstraintStatus::Rejected(CAPACITY_CONSTRAINT_CODE)),
    case02_pickup_fits: (7, 0, 1, None, ConstraintStatus::Fulfilled),
    case03_delivery_next_to_pickup: (7, 1, 1, Some(1), ConstraintStatus::Fulfilled),
    case04_delivery_over_peak: (7, 1, 3, Some(1), ConstraintStatus::Fulfilled),
    case05_delivery_overloaded: (8, 1, 2, Some(1), ConstraintStatus::RejectedPrune(CAPACITY_CONSTRAINT_CODE)),
    case06_delivery_before_peak: (8, 1, 1, Some(1), ConstraintStatus::Fulfilled),
}
