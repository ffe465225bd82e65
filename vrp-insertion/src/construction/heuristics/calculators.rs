#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/calculators_test.rs"]
mod calculators_test;

use crate::construction::constraints::{ConstraintPipeline, ConstraintStatus};
use crate::construction::heuristics::*;
use crate::models::common::{Cost, Timestamp};
use crate::models::problem::*;
use crate::models::solution::Activity;
use crate::utils::compare_floats;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// Finds the cheapest feasible insertion of the job into the route of insertion context.
pub trait JobInsertionCalculator: Send + Sync {
    /// Calculates insertion. Positions with marginal cost not lower than `best_known` are ignored.
    fn calculate(&self, ctx: &InsertionContext, best_known: Option<Cost>) -> InsertionResult;
}

/// Evaluates only immediate predecessor and successor of every insertion position.
pub struct LocalInsertionCalculator {
    constraint: Arc<ConstraintPipeline>,
    estimator: CostEstimator,
    neighbourhood: Option<Arc<dyn Neighbourhood>>,
}

impl LocalInsertionCalculator {
    /// Creates a new instance of `LocalInsertionCalculator`.
    pub fn new(
        constraint: Arc<ConstraintPipeline>,
        transport: Arc<dyn TransportCost>,
        activity: Arc<dyn ActivityCost>,
        neighbourhood: Option<Arc<dyn Neighbourhood>>,
    ) -> Self {
        Self { constraint, estimator: CostEstimator { transport, activity }, neighbourhood }
    }
}

impl JobInsertionCalculator for LocalInsertionCalculator {
    fn calculate(&self, ctx: &InsertionContext, best_known: Option<Cost>) -> InsertionResult {
        let Some(target) = get_service_activity(ctx.job) else { return InsertionResult::make_failure() };
        let actor = ctx.actor.as_ref();

        let mut best: Option<(Cost, usize)> = None;
        let mut bound = best_known;
        let mut failure = FailureTracker::default();
        let mut prev_departure = ctx.departure;

        for leg_idx in 0..ctx.last_index() {
            let (prev, next) = (ctx.activity(leg_idx), ctx.activity(leg_idx + 1));

            if !is_neighbour_position(self.neighbourhood.as_deref(), prev, &target, next) {
                prev_departure = self.estimator.advance(actor, prev, next, prev_departure);
                continue;
            }

            let activity_ctx =
                ActivityContext { index: leg_idx, prev, target: &target, next, prev_departure, related: None };

            match self.constraint.evaluate_hard_activity(ctx, &activity_ctx) {
                ConstraintStatus::Fulfilled => {
                    let cost = self.estimator.marginal_cost(actor, prev, &target, next, prev_departure, bound);
                    if let Some(cost) = cost.filter(|&cost| is_better(cost, bound)) {
                        best = Some((cost, leg_idx));
                        bound = Some(cost);
                    }
                }
                ConstraintStatus::Rejected(code) => failure.reject(code),
                ConstraintStatus::RejectedPrune(code) => {
                    failure.prune(code);
                    break;
                }
            }

            prev_departure = self.estimator.advance(actor, prev, next, prev_departure);
        }

        match best {
            Some((cost, leg_idx)) => make_success(ctx, cost, vec![(target, leg_idx)]),
            None => failure.into_result(ctx.job),
        }
    }
}

/// Approximates marginal cost of every position using a forward looking path and re-scores the
/// best candidates exactly on the full tour.
pub struct RouteLevelInsertionCalculator {
    constraint: Arc<ConstraintPipeline>,
    estimator: CostEstimator,
    neighbourhood: Option<Arc<dyn Neighbourhood>>,
    forward_looking: usize,
    memory_size: usize,
}

impl RouteLevelInsertionCalculator {
    /// Creates a new instance of `RouteLevelInsertionCalculator`. `forward_looking` specifies
    /// amount of activities after the successor included into approximation, `memory_size` specifies
    /// amount of best approximations re-scored exactly: zero means the best approximation is trusted.
    pub fn new(
        constraint: Arc<ConstraintPipeline>,
        transport: Arc<dyn TransportCost>,
        activity: Arc<dyn ActivityCost>,
        neighbourhood: Option<Arc<dyn Neighbourhood>>,
        forward_looking: usize,
        memory_size: usize,
    ) -> Self {
        let estimator = CostEstimator { transport, activity };

        Self { constraint, estimator, neighbourhood, forward_looking, memory_size }
    }

    fn approximate(
        &self,
        ctx: &InsertionContext,
        leg_idx: usize,
        target: &Activity,
        prev_departure: Timestamp,
    ) -> Cost {
        let actor = ctx.actor.as_ref();
        let window_end = (leg_idx + 1 + self.forward_looking).min(ctx.last_index());

        let (cost, departure) = self.estimator.leg_cost(actor, ctx.activity(leg_idx), target, prev_departure);
        let (path_cost, _, _) =
            (leg_idx + 1..=window_end).fold((cost, departure, target), |(total, departure, from), activity_idx| {
                let to = ctx.activity(activity_idx);
                let (cost, departure) = self.estimator.leg_cost(actor, from, to, departure);
                (total + cost, departure, to)
            });

        path_cost - (ctx.cost_at(window_end) - ctx.cost_at(leg_idx))
    }
}

impl JobInsertionCalculator for RouteLevelInsertionCalculator {
    fn calculate(&self, ctx: &InsertionContext, best_known: Option<Cost>) -> InsertionResult {
        let Some(target) = get_service_activity(ctx.job) else { return InsertionResult::make_failure() };
        let actor = ctx.actor.as_ref();

        let mut candidates = BinaryHeap::new();
        let mut failure = FailureTracker::default();
        let mut prev_departure = ctx.departure;

        for leg_idx in 0..ctx.last_index() {
            let (prev, next) = (ctx.activity(leg_idx), ctx.activity(leg_idx + 1));

            if is_neighbour_position(self.neighbourhood.as_deref(), prev, &target, next) {
                let activity_ctx =
                    ActivityContext { index: leg_idx, prev, target: &target, next, prev_departure, related: None };

                match self.constraint.evaluate_hard_activity(ctx, &activity_ctx) {
                    ConstraintStatus::Fulfilled => {
                        let cost = self.approximate(ctx, leg_idx, &target, prev_departure);
                        if is_better(cost, best_known) {
                            candidates.push(Candidate { cost, leg_idx });
                        }
                    }
                    ConstraintStatus::Rejected(code) => failure.reject(code),
                    ConstraintStatus::RejectedPrune(code) => {
                        failure.prune(code);
                        break;
                    }
                }
            }

            prev_departure = self.estimator.advance(actor, prev, next, prev_departure);
        }

        if self.memory_size == 0 {
            return match candidates.pop() {
                Some(Candidate { cost, leg_idx }) => make_success(ctx, cost, vec![(target, leg_idx)]),
                None => failure.into_result(ctx.job),
            };
        }

        if candidates.is_empty() {
            return failure.into_result(ctx.job);
        }

        let original = self.estimator.tour_cost(ctx, None);
        let best = std::iter::from_fn(|| candidates.pop()).take(self.memory_size).fold(
            None,
            |best: Option<(Cost, usize)>, Candidate { leg_idx, .. }| {
                let cost = self.estimator.tour_cost(ctx, Some((&target, leg_idx))) - original;
                let bound = best.map(|(cost, _)| cost).or(best_known);

                if is_better(cost, bound) { Some((cost, leg_idx)) } else { best }
            },
        );

        match best {
            Some((cost, leg_idx)) => make_success(ctx, cost, vec![(target, leg_idx)]),
            None => failure.into_result(ctx.job),
        }
    }
}

/// Evaluates pickup and delivery positions of the shipment in a nested scan: delivery is never
/// placed before its pickup.
pub struct ShipmentInsertionCalculator {
    constraint: Arc<ConstraintPipeline>,
    estimator: CostEstimator,
    neighbourhood: Option<Arc<dyn Neighbourhood>>,
}

impl ShipmentInsertionCalculator {
    /// Creates a new instance of `ShipmentInsertionCalculator`.
    pub fn new(
        constraint: Arc<ConstraintPipeline>,
        transport: Arc<dyn TransportCost>,
        activity: Arc<dyn ActivityCost>,
        neighbourhood: Option<Arc<dyn Neighbourhood>>,
    ) -> Self {
        Self { constraint, estimator: CostEstimator { transport, activity }, neighbourhood }
    }
}

impl JobInsertionCalculator for ShipmentInsertionCalculator {
    fn calculate(&self, ctx: &InsertionContext, best_known: Option<Cost>) -> InsertionResult {
        let Some((pickup, delivery)) = get_shipment_activities(ctx.job) else {
            return InsertionResult::make_failure();
        };
        let actor = ctx.actor.as_ref();
        let last_idx = ctx.last_index();

        let mut best: Option<(Cost, usize, usize)> = None;
        let mut bound = best_known;
        let mut failure = FailureTracker::default();
        let mut pickup_prev_departure = ctx.departure;

        for pickup_idx in 0..last_idx {
            let (prev, next) = (ctx.activity(pickup_idx), ctx.activity(pickup_idx + 1));

            let status = if is_neighbour_position(self.neighbourhood.as_deref(), prev, &pickup, next) {
                let activity_ctx = ActivityContext {
                    index: pickup_idx,
                    prev,
                    target: &pickup,
                    next,
                    prev_departure: pickup_prev_departure,
                    related: None,
                };
                Some(self.constraint.evaluate_hard_activity(ctx, &activity_ctx))
            } else {
                None
            };

            match status {
                Some(ConstraintStatus::Fulfilled) => {
                    let pickup_cost =
                        self.estimator.marginal_cost(actor, prev, &pickup, next, pickup_prev_departure, bound);

                    if let Some(pickup_cost) = pickup_cost {
                        let pickup_departure = self.estimator.advance(actor, prev, &pickup, pickup_prev_departure);
                        let mut prev = &pickup;
                        let mut prev_departure = pickup_departure;

                        for delivery_idx in pickup_idx..last_idx {
                            let next = ctx.activity(delivery_idx + 1);

                            if is_neighbour_position(self.neighbourhood.as_deref(), prev, &delivery, next) {
                                let activity_ctx = ActivityContext {
                                    index: delivery_idx,
                                    prev,
                                    target: &delivery,
                                    next,
                                    prev_departure,
                                    related: Some(pickup_idx),
                                };

                                match self.constraint.evaluate_hard_activity(ctx, &activity_ctx) {
                                    ConstraintStatus::Fulfilled => {
                                        let remaining = bound.map(|bound| bound - pickup_cost);
                                        let delivery_cost = self.estimator.marginal_cost(
                                            actor,
                                            prev,
                                            &delivery,
                                            next,
                                            prev_departure,
                                            remaining,
                                        );

                                        if let Some(total) = delivery_cost
                                            .map(|cost| pickup_cost + cost)
                                            .filter(|&total| is_better(total, bound))
                                        {
                                            best = Some((total, pickup_idx, delivery_idx));
                                            bound = Some(total);
                                        }
                                    }
                                    ConstraintStatus::Rejected(code) => failure.reject(code),
                                    ConstraintStatus::RejectedPrune(code) => {
                                        failure.reject(code);
                                        break;
                                    }
                                }
                            }

                            // NOTE tour is shifted by the pickup: stop when the shift breaks the next activity
                            let arrival = self.estimator.arrival(actor, prev, next, prev_departure);
                            if arrival > ctx.latest_start_at(delivery_idx + 1) {
                                break;
                            }

                            prev_departure = self.estimator.departure(actor, next, arrival);
                            prev = next;
                        }
                    }
                }
                Some(ConstraintStatus::Rejected(code)) => failure.reject(code),
                Some(ConstraintStatus::RejectedPrune(code)) => {
                    failure.prune(code);
                    break;
                }
                None => {}
            }

            pickup_prev_departure = self.estimator.advance(actor, prev, next, pickup_prev_departure);
        }

        match best {
            Some((cost, pickup_idx, delivery_idx)) => {
                make_success(ctx, cost, vec![(pickup, pickup_idx), (delivery, delivery_idx)])
            }
            None => failure.into_result(ctx.job),
        }
    }
}

/// Estimates costs and schedules using the candidate actor.
struct CostEstimator {
    transport: Arc<dyn TransportCost>,
    activity: Arc<dyn ActivityCost>,
}

impl CostEstimator {
    /// Returns arrival time at `to` when departing from `from` at given time.
    fn arrival(&self, actor: &Actor, from: &Activity, to: &Activity, departure: Timestamp) -> Timestamp {
        departure
            + self.transport.duration(actor, from.place.location, to.place.location, TravelTime::Departure(departure))
    }

    fn departure(&self, actor: &Actor, activity: &Activity, arrival: Timestamp) -> Timestamp {
        self.activity.estimate_departure(actor, activity, arrival)
    }

    /// Returns departure time from `to` when departing from `from` at given time.
    fn advance(&self, actor: &Actor, from: &Activity, to: &Activity, departure: Timestamp) -> Timestamp {
        self.departure(actor, to, self.arrival(actor, from, to, departure))
    }

    /// Returns transport cost of the leg plus activity cost at its end within departure from the end.
    fn leg_cost(&self, actor: &Actor, from: &Activity, to: &Activity, departure: Timestamp) -> (Cost, Timestamp) {
        let arrival = self.arrival(actor, from, to, departure);
        let cost = self.transport.cost(actor, from.place.location, to.place.location, TravelTime::Departure(departure))
            + self.activity.cost(actor, to, arrival);

        (cost, self.departure(actor, to, arrival))
    }

    /// Returns marginal cost of inserting target between prev and next or none if the running
    /// total exceeds the bound.
    fn marginal_cost(
        &self,
        actor: &Actor,
        prev: &Activity,
        target: &Activity,
        next: &Activity,
        prev_departure: Timestamp,
        bound: Option<Cost>,
    ) -> Option<Cost> {
        let exceeds = |total: Cost| bound.is_some_and(|bound| compare_floats(total, bound) == Ordering::Greater);

        let (old_cost, _) = self.leg_cost(actor, prev, next, prev_departure);
        let (prev_target_cost, target_departure) = self.leg_cost(actor, prev, target, prev_departure);

        let total = prev_target_cost - old_cost;
        if exceeds(total) {
            return None;
        }

        let (target_next_cost, _) = self.leg_cost(actor, target, next, target_departure);
        let total = total + target_next_cost;

        if exceeds(total) { None } else { Some(total) }
    }

    /// Returns full tour cost for the candidate actor, optionally with target inserted after given index.
    fn tour_cost(&self, ctx: &InsertionContext, insertion: Option<(&Activity, usize)>) -> Cost {
        let actor = ctx.actor.as_ref();

        let (total, _, _) = (1..=ctx.last_index()).fold(
            (0., ctx.departure, ctx.activity(0)),
            |(mut total, mut departure, mut from), activity_idx| {
                if let Some((target, _)) = insertion.filter(|(_, leg_idx)| leg_idx + 1 == activity_idx) {
                    let (cost, target_departure) = self.leg_cost(actor, from, target, departure);
                    total += cost;
                    departure = target_departure;
                    from = target;
                }

                let to = ctx.activity(activity_idx);
                let (cost, to_departure) = self.leg_cost(actor, from, to, departure);

                (total + cost, to_departure, to)
            },
        );

        total
    }
}

/// Keeps the last violated constraint code.
#[derive(Default)]
struct FailureTracker {
    code: Option<i32>,
    stopped: bool,
}

impl FailureTracker {
    fn reject(&mut self, code: i32) {
        self.code = Some(code);
    }

    fn prune(&mut self, code: i32) {
        self.code = Some(code);
        self.stopped = true;
    }

    fn into_result(self, job: &Job) -> InsertionResult {
        InsertionResult::make_failure_with_code(
            self.code.unwrap_or(UNKNOWN_FAILURE_CODE),
            self.stopped,
            Some(job.clone()),
        )
    }
}

/// An approximated insertion position ordered by cost ascending, then by position.
struct Candidate {
    cost: Cost,
    leg_idx: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE reversed to make max heap behave as min heap
        compare_floats(other.cost, self.cost).then_with(|| other.leg_idx.cmp(&self.leg_idx))
    }
}

fn make_success(ctx: &InsertionContext, cost: Cost, activities: Vec<(Activity, usize)>) -> InsertionResult {
    InsertionResult::make_success(
        cost,
        ctx.job.clone(),
        activities,
        ctx.actor.clone(),
        ctx.departure,
        ctx.route_ctx.id(),
    )
}

fn is_better(cost: Cost, bound: Option<Cost>) -> bool {
    bound.is_none_or(|bound| compare_floats(cost, bound) == Ordering::Less)
}

fn is_neighbour_position(
    neighbourhood: Option<&dyn Neighbourhood>,
    prev: &Activity,
    target: &Activity,
    next: &Activity,
) -> bool {
    let Some(neighbourhood) = neighbourhood else { return true };

    let are_neighbours =
        |from: &Activity, to: &Activity| neighbourhood.are_neighbours(from.place.location, to.place.location);

    let to_prev = (!prev.is_sentinel()).then(|| are_neighbours(prev, target));
    let to_next = (!next.is_sentinel()).then(|| are_neighbours(target, next));

    match (to_prev, to_next) {
        (None, None) => true,
        _ => to_prev.unwrap_or(false) || to_next.unwrap_or(false),
    }
}

fn get_service_activity(job: &Job) -> Option<Activity> {
    job.as_service()?;
    Activity::new_job_activities(job).into_iter().next()
}

fn get_shipment_activities(job: &Job) -> Option<(Activity, Activity)> {
    job.as_shipment()?;
    let mut activities = Activity::new_job_activities(job).into_iter();

    activities.next().zip(activities.next())
}
