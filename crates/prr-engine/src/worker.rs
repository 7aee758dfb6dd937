//! Parallel round evaluation on the tokio runtime
//!
//! Each round splits the sentences into contiguous chunks and evaluates every
//! chunk on a blocking task against a shared, frozen snapshot. Awaiting all
//! tasks is the round barrier: the next snapshot is assembled only after every
//! chunk has returned, so results are identical to the sequential solver.

use crate::solver::{FixedPointSolver, RoundOutcome, Solution};
use crate::{EngineError, Result, SentenceGraph, SolverConfig};
use prr_domain::{Assignment, Belnap, Operators, TruthValue};
use std::sync::Arc;

/// Solver that evaluates each round on several blocking tasks
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use prr_domain::{Formula, TruthValue};
/// use prr_engine::{ParallelSolver, SentenceGraph, SolverConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let graph = SentenceGraph::builder()
///         .define("A", Formula::negation(Formula::reference("B")))
///         .define("B", Formula::negation(Formula::reference("A")))
///         .build()?;
///
///     let solver = ParallelSolver::new(SolverConfig::default());
///     let solution = solver.solve(Arc::new(graph)).await?;
///     assert_eq!(solution.value("A"), Some(TruthValue::Both));
///     Ok(())
/// }
/// ```
pub struct ParallelSolver<O = Belnap> {
    solver: Arc<FixedPointSolver<O>>,
    workers: usize,
}

impl<O> Clone for ParallelSolver<O> {
    fn clone(&self) -> Self {
        Self {
            solver: Arc::clone(&self.solver),
            workers: self.workers,
        }
    }
}

impl ParallelSolver<Belnap> {
    /// Create a parallel solver over the B4 connectives
    pub fn new(config: SolverConfig) -> Self {
        Self::from_solver(FixedPointSolver::new(config))
    }

    /// Create a parallel solver with default configuration
    pub fn default_config() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<O> ParallelSolver<O>
where
    O: Operators + Send + Sync + 'static,
{
    /// Wrap a sequential solver; the worker count comes from its configuration
    pub fn from_solver(solver: FixedPointSolver<O>) -> Self {
        let workers = solver.config().workers.max(1);
        Self {
            solver: Arc::new(solver),
            workers,
        }
    }

    /// Number of evaluation tasks per round
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one round with the sentences split across blocking tasks
    ///
    /// # Errors
    ///
    /// Returns `Worker` if an evaluation task panics or is cancelled.
    pub async fn step(
        &self,
        graph: &Arc<SentenceGraph>,
        previous: &Assignment,
    ) -> Result<RoundOutcome> {
        let total = graph.len();
        let chunk = total.div_ceil(self.workers).max(1);
        let snapshot = Arc::new(previous.clone());

        let mut handles = Vec::with_capacity(self.workers);
        for start in (0..total).step_by(chunk) {
            let end = (start + chunk).min(total);
            let graph = Arc::clone(graph);
            let solver = Arc::clone(&self.solver);
            let snapshot = Arc::clone(&snapshot);

            handles.push(tokio::task::spawn_blocking(move || {
                (start..end)
                    .map(|i| solver.update(&graph, graph.sentence_at(i), &snapshot))
                    .collect::<Vec<TruthValue>>()
            }));
        }

        let mut values = Vec::with_capacity(total);
        for handle in handles {
            let part = handle
                .await
                .map_err(|e| EngineError::Worker(format!("Evaluation task failed: {}", e)))?;
            values.extend(part);
        }

        let next: Assignment = graph
            .names()
            .map(str::to_string)
            .zip(values)
            .collect();
        Ok(RoundOutcome::between(previous, next))
    }

    /// Solve the graph to a stable assignment
    ///
    /// # Errors
    ///
    /// Same as [`FixedPointSolver::solve`], plus `Worker` for task failures.
    pub async fn solve(&self, graph: Arc<SentenceGraph>) -> Result<Solution> {
        self.solver.verify()?;

        tracing::debug!(
            "Parallel solve started ({} sentences, {} workers)",
            graph.len(),
            self.workers
        );

        let mut run = self.solver.start(&graph);
        while run.needs_round() {
            let outcome = self.step(&graph, run.current()).await?;
            run.apply(outcome);
        }
        run.finish()
    }

    /// Solve several independent graphs concurrently
    ///
    /// Results come back in the order of `graphs`.
    pub async fn solve_all(&self, graphs: Vec<Arc<SentenceGraph>>) -> Vec<Result<Solution>> {
        let handles: Vec<_> = graphs
            .into_iter()
            .map(|graph| {
                let solver = self.clone();
                tokio::spawn(async move { solver.solve(graph).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(EngineError::Worker(format!("Solve task failed: {}", e))),
            });
        }
        results
    }
}
