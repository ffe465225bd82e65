use super::*;
use crate::utils::ThreadPool;
use rand::prelude::SliceRandom;
use std::sync::mpsc;

/// Inserts jobs like best insertion, but evaluates batches of routes concurrently on a bounded
/// worker pool. Workers only read the solution; the winning insertion is applied on the caller.
pub struct ConcurrentBestInsertion {
    heuristic: InsertionHeuristic,
    pool: ThreadPool,
    batches: usize,
}

impl ConcurrentBestInsertion {
    /// Creates a new instance of `ConcurrentBestInsertion` with default listeners.
    pub fn new(problem: &Problem, environment: Arc<Environment>, config: InsertionConfig) -> GenericResult<Self> {
        Self::new_with_listeners(problem, environment, InsertionListeners::new(problem), config)
    }

    /// Creates a new instance of `ConcurrentBestInsertion` with given listeners.
    pub fn new_with_listeners(
        problem: &Problem,
        environment: Arc<Environment>,
        listeners: InsertionListeners,
        config: InsertionConfig,
    ) -> GenericResult<Self> {
        let pool = environment.parallelism.create_pool(config.threads)?;
        let batches = config.batches.max(1);
        let heuristic = InsertionHeuristic::new("concurrent best insertion", problem, environment, listeners, &config);

        Ok(Self { heuristic, pool, batches })
    }

    fn evaluate_job(&self, solution_ctx: &SolutionContext, job: &Job) -> InsertionResult {
        let routes = solution_ctx.routes.as_slice();
        let batch_size = routes.len().div_ceil(self.batches).max(1);
        let evaluator = &self.heuristic.evaluator;

        let (sender, receiver) = mpsc::channel::<(usize, InsertionResult)>();

        self.pool.execute(|| {
            rayon::scope(|scope| {
                let batches = routes.chunks(batch_size).enumerate();
                let last_idx = batches.len();

                batches.for_each(|(batch_idx, batch)| {
                    let sender = sender.clone();
                    scope.spawn(move |_| {
                        let result = evaluator.evaluate_routes(solution_ctx, batch, job, None);
                        // NOTE receiver lives until all tasks are finished
                        let _ = sender.send((batch_idx, result));
                    });
                });

                let sender = sender.clone();
                scope.spawn(move |_| {
                    let result = evaluator.evaluate_new_routes(solution_ctx, job, None);
                    let _ = sender.send((last_idx, result));
                });
            });
        });

        drop(sender);

        let mut results = receiver.into_iter().collect::<Vec<_>>();
        results.sort_by_key(|(batch_idx, _)| *batch_idx);

        results
            .into_iter()
            .map(|(_, result)| result)
            .fold(InsertionResult::make_failure(), InsertionResult::choose_best_result)
    }
}

impl Recreate for ConcurrentBestInsertion {
    fn insert_jobs(&self, solution_ctx: &mut SolutionContext, jobs: Vec<Job>) -> GenericResult<()> {
        let mut jobs = jobs;
        jobs.shuffle(&mut self.heuristic.environment.random.get_rng());

        self.heuristic.start(solution_ctx, jobs.as_slice());

        jobs.iter().try_for_each(|job| {
            let result = self.evaluate_job(solution_ctx, job);
            self.heuristic.accept(solution_ctx, job, result)
        })?;

        self.heuristic.finish(solution_ctx, jobs.len());

        Ok(())
    }
}
