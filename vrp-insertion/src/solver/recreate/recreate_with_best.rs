use super::*;
use rand::prelude::SliceRandom;

/// Inserts jobs in random order, each at the cheapest position among all routes and new routes.
pub struct BestInsertion {
    heuristic: InsertionHeuristic,
}

impl BestInsertion {
    /// Creates a new instance of `BestInsertion` with default listeners.
    pub fn new(problem: &Problem, environment: Arc<Environment>, config: InsertionConfig) -> Self {
        Self::new_with_listeners(problem, environment, InsertionListeners::new(problem), config)
    }

    /// Creates a new instance of `BestInsertion` with given listeners.
    pub fn new_with_listeners(
        problem: &Problem,
        environment: Arc<Environment>,
        listeners: InsertionListeners,
        config: InsertionConfig,
    ) -> Self {
        Self { heuristic: InsertionHeuristic::new("best insertion", problem, environment, listeners, &config) }
    }
}

impl Recreate for BestInsertion {
    fn insert_jobs(&self, solution_ctx: &mut SolutionContext, jobs: Vec<Job>) -> GenericResult<()> {
        let mut jobs = jobs;
        jobs.shuffle(&mut self.heuristic.environment.random.get_rng());

        self.heuristic.start(solution_ctx, jobs.as_slice());

        jobs.iter().try_for_each(|job| {
            let result = self.heuristic.evaluator.evaluate_job(solution_ctx, job);
            self.heuristic.accept(solution_ctx, job, result)
        })?;

        self.heuristic.finish(solution_ctx, jobs.len());

        Ok(())
    }
}
