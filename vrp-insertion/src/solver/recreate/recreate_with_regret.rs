use super::*;
use crate::models::common::{Cost, Location};
use crate::models::problem::{Actor, TransportCost};
use crate::utils::compare_floats;
use std::cmp::Ordering;

/// Provides an auxiliary score added to the regret of the job.
pub trait RegretScorer: Send + Sync {
    /// Returns score of the job given its best insertion.
    fn score(&self, job: &Job, best: &InsertionSuccess) -> f64;
}

/// Scores jobs by their time window width and the distance from the depot: narrow time windows and
/// distant jobs are preferred.
pub struct TimeWindowScorer {
    transport: Arc<dyn TransportCost>,
    time_window_param: f64,
    depot_distance_param: f64,
    min_time_window_score: f64,
}

impl TimeWindowScorer {
    /// Creates a new instance of `TimeWindowScorer` with default parameters.
    pub fn new(transport: Arc<dyn TransportCost>) -> Self {
        Self::new_with_params(transport, -0.5, 0.1, -100000.)
    }

    /// Creates a new instance of `TimeWindowScorer` with given parameters.
    pub fn new_with_params(
        transport: Arc<dyn TransportCost>,
        time_window_param: f64,
        depot_distance_param: f64,
        min_time_window_score: f64,
    ) -> Self {
        Self { transport, time_window_param, depot_distance_param, min_time_window_score }
    }

    fn distance(&self, from: Location, to: Location) -> f64 {
        let distance = self.transport.distance_approx(from, to);
        if distance.is_finite() && distance > 0. { distance } else { 0. }
    }

    fn max_depot_distance(&self, actor: &Actor, job: &Job) -> f64 {
        job.places()
            .map(|place| {
                self.distance(actor.vehicle.start, place.location).max(self.distance(place.location, actor.vehicle.end))
            })
            .fold(0., f64::max)
    }
}

impl RegretScorer for TimeWindowScorer {
    fn score(&self, job: &Job, best: &InsertionSuccess) -> f64 {
        let min_width = job.places().map(|place| place.time.duration()).fold(f64::MAX, f64::min);
        let time_window_score = (self.time_window_param * min_width).max(self.min_time_window_score);

        time_window_score + self.depot_distance_param * self.max_depot_distance(best.actor.as_ref(), job)
    }
}

/// Inserts first the job with the highest regret: the difference between the cost of its second
/// best and best routes plus an auxiliary score. Scores are recomputed for remaining jobs each round.
pub struct RegretInsertion {
    heuristic: InsertionHeuristic,
    scorer: Arc<dyn RegretScorer>,
}

impl RegretInsertion {
    /// Creates a new instance of `RegretInsertion` with default listeners and time window scorer.
    pub fn new(problem: &Problem, environment: Arc<Environment>, config: InsertionConfig) -> Self {
        let scorer = Arc::new(TimeWindowScorer::new(problem.transport.clone()));
        Self::new_with_listeners(problem, environment, InsertionListeners::new(problem), config, scorer)
    }

    /// Creates a new instance of `RegretInsertion` with given listeners and scorer.
    pub fn new_with_listeners(
        problem: &Problem,
        environment: Arc<Environment>,
        listeners: InsertionListeners,
        config: InsertionConfig,
        scorer: Arc<dyn RegretScorer>,
    ) -> Self {
        let heuristic = InsertionHeuristic::new("regret insertion", problem, environment, listeners, &config);

        Self { heuristic, scorer }
    }

    /// Replaces auxiliary scorer.
    pub fn with_scorer(mut self, scorer: Arc<dyn RegretScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    fn score(&self, job: &Job, best: &InsertionSuccess, second: Option<&InsertionSuccess>) -> f64 {
        let regret = match second {
            Some(second) => second.cost - best.cost,
            None => i32::MAX as Cost - best.cost,
        };

        regret + self.scorer.score(job, best)
    }
}

impl Recreate for RegretInsertion {
    fn insert_jobs(&self, solution_ctx: &mut SolutionContext, jobs: Vec<Job>) -> GenericResult<()> {
        let total = jobs.len();
        let mut jobs = jobs;

        self.heuristic.start(solution_ctx, jobs.as_slice());

        while !jobs.is_empty() {
            let mut best: Option<(f64, InsertionSuccess)> = None;
            let mut bad_jobs = vec![];

            for (job_idx, job) in jobs.iter().enumerate() {
                let results = self.heuristic.evaluator.evaluate_options(solution_ctx, job);
                let (mut successes, failure) = results.into_iter().fold(
                    (Vec::new(), InsertionResult::make_failure()),
                    |(mut successes, failure), result| match result {
                        InsertionResult::Success(success) => {
                            successes.push(success);
                            (successes, failure)
                        }
                        result => (successes, InsertionResult::choose_best_result(failure, result)),
                    },
                );

                successes.sort_by(|a, b| compare_floats(a.cost, b.cost));
                let mut successes = successes.into_iter();

                let Some(first) = successes.next() else {
                    if let InsertionResult::Failure(failure) = failure {
                        bad_jobs.push((job_idx, failure));
                    }
                    continue;
                };
                let second = successes.next();

                let score = self.score(job, &first, second.as_ref());
                let is_better = best
                    .as_ref()
                    .is_none_or(|(best_score, _)| compare_floats(score, *best_score) == Ordering::Greater);

                if is_better {
                    best = Some((score, first));
                }
            }

            // NOTE jobs which cannot be inserted anywhere are handled immediately
            for (job_idx, failure) in bad_jobs.iter().rev() {
                let job = jobs.remove(*job_idx);
                self.heuristic.fail(solution_ctx, &job, failure)?;
            }

            if let Some((_, success)) = best {
                jobs.retain(|job| *job != success.job);
                self.heuristic.apply(solution_ctx, success);
            }
        }

        self.heuristic.finish(solution_ctx, total);

        Ok(())
    }
}
