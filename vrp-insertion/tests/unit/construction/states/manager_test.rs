use super::*;
use crate::construction::heuristics::RouteId;
use crate::helpers::construction::create_solution_with_routes;
use crate::helpers::models::domain::{create_test_problem, test_problem_builder};
use crate::helpers::models::problem::*;
use crate::models::solution::Route;

const VISITS_KEY: StateKey = StateKey::new(100);

struct VisitCounter {}

impl ForwardVisitor for VisitCounter {
    fn state_keys(&self) -> &[StateKey] {
        &[VISITS_KEY]
    }

    fn visit(&self, _: &Route, _: usize, state: &mut RouteState) {
        let visits = state.get_route_state(VISITS_KEY).unwrap_or(0.);
        state.put_route_state(VISITS_KEY, visits + 1.);
    }
}

struct CostReader {}

impl BackwardVisitor for CostReader {
    fn state_keys(&self) -> &[StateKey] {
        &[]
    }

    fn visit(&self, _: &Route, _: usize, _: &mut RouteState) {}

    fn finish(&self, _: &Route, state: &mut RouteState) {
        // forward states are already available
        assert!(state.get_total_cost().is_some());
    }
}

#[test]
fn can_run_custom_visitors_after_default_ones() {
    let problem = test_problem_builder()
        .add_jobs(vec![test_service("job1", 3), test_service("job2", 5)])
        .add_vehicles(vec![test_vehicle("v1")])
        .add_forward_visitor(Arc::new(VisitCounter {}))
        .add_backward_visitor(Arc::new(CostReader {}))
        .build()
        .expect("cannot build problem");

    let solution_ctx = create_solution_with_routes(&problem, vec![("v1", vec!["job1", "job2"])]);

    assert_eq!(solution_ctx.routes[0].state().get_route_state(VISITS_KEY), Some(4.));
    assert!(!solution_ctx.routes[0].is_stale());
}

#[test]
#[should_panic(expected = "registered by more than one visitor")]
fn can_detect_state_key_registered_twice() {
    let problem = create_test_problem(vec![], vec![test_vehicle("v1")]);
    let mut manager = StateManager::empty(problem.transport.clone(), problem.activity.clone());

    manager.add_forward_visitor(Arc::new(VisitCounter {}));
    manager.add_forward_visitor(Arc::new(VisitCounter {}));
}

#[test]
fn can_detect_default_key_overlap() {
    let problem = create_test_problem(vec![], vec![test_vehicle("v1")]);
    let mut manager = StateManager::new(problem.fleet.as_ref(), problem.transport.clone(), problem.activity.clone());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        manager.add_forward_visitor(Arc::new(LoadUpdater::default()));
    }));

    assert!(result.is_err());
}

#[test]
fn can_update_only_stale_routes() {
    let problem = create_test_problem(vec![test_service("job1", 3), test_service("job2", 5)], vec![test_vehicle("v1")]);
    let mut solution_ctx = create_solution_with_routes(&problem, vec![("v1", vec!["job1"])]);
    let job2 = problem.jobs.all()[1].clone();

    let route_idx = solution_ctx.route_index(RouteId(0)).unwrap();
    solution_ctx.routes[route_idx]
        .route_mut()
        .tour
        .insert_last(crate::models::solution::Activity::new_job_activities(&job2).remove(0));
    assert!(solution_ctx.routes[route_idx].is_stale());
    assert_eq!(solution_ctx.routes[route_idx].state().get_total_cost(), Some(6.));

    problem.states.update_solution(&mut solution_ctx);

    assert!(!solution_ctx.routes[route_idx].is_stale());
    assert_eq!(solution_ctx.routes[route_idx].state().get_total_cost(), Some(10.));
}
