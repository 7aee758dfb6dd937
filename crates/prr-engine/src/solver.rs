//! Round-based fixed-point solver
//!
//! Every round evaluates every sentence against the frozen assignment of the
//! previous round and joins the result into the sentence's previous value:
//!
//! ```text
//! next[s] = previous[s] ⊔ evaluate(formula[s], previous)
//! ```
//!
//! Join never moves a value down, and the information lattice has height 2,
//! so each sentence changes at most twice. Every round before the last changes
//! at least one sentence, which bounds a run at `2N + 1` rounds for N sentences.
//! With monotone operators and open grounding the chain is the Kleene
//! iteration from the all-Neither bottom and ends in the least fixed point.

use crate::config::Grounding;
use crate::graph::Sentence;
use crate::{EngineError, Result, SentenceGraph, SolveMetrics, SolverConfig};
use prr_domain::operators::monotonicity_violations;
use prr_domain::{Assignment, Belnap, ClosedWorld, Operators, Projection, TruthValue, Valuation};
use std::time::Instant;

/// Lifecycle of a solver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Every sentence at Neither, no round run yet
    Initializing,

    /// At least one round has run and the last one changed something
    Iterating {
        /// Number of rounds completed so far
        round: usize,
    },

    /// A round produced no change (terminal)
    Stable,

    /// The round bound was reached without stabilizing (terminal)
    NonConvergent,
}

impl SolverState {
    /// Whether the run has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverState::Stable | SolverState::NonConvergent)
    }
}

/// Result of one synchronous round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// The assignment that replaces the previous one
    pub next: Assignment,

    /// Sentences whose value changed in this round, in name order
    pub changed: Vec<String>,
}

impl RoundOutcome {
    /// Outcome of a round that turned `previous` into `next`
    pub(crate) fn between(previous: &Assignment, next: Assignment) -> Self {
        let changed = next
            .changed_since(previous)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { next, changed }
    }

    /// Whether the round left every value unchanged
    pub fn is_fixed(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Outcome of a successful solver run
#[derive(Debug, Clone)]
pub struct Solution {
    /// The stable assignment
    pub assignment: Assignment,

    /// Terminal state of the run
    pub state: SolverState,

    /// Every assignment of the run, starting from the bottom (empty unless
    /// `record_trace` is set)
    pub trace: Vec<Assignment>,

    /// Metrics collected during the run
    pub metrics: SolveMetrics,
}

impl Solution {
    /// Rounds evaluated, including the round that confirmed stability
    pub fn rounds(&self) -> usize {
        self.metrics.rounds
    }

    /// Rounds that changed at least one value
    pub fn changing_rounds(&self) -> usize {
        self.metrics.changing_rounds
    }

    /// Stable value of a sentence
    pub fn value(&self, name: &str) -> Option<TruthValue> {
        self.assignment.get(name)
    }

    /// Confidence intervals of the stable assignment
    pub fn projection(&self) -> Projection {
        prr_domain::project(&self.assignment)
    }
}

/// Synchronous fixed-point solver
///
/// # Examples
///
/// ```
/// use prr_domain::{Formula, TruthValue};
/// use prr_engine::{FixedPointSolver, SentenceGraph};
///
/// let graph = SentenceGraph::builder()
///     .define("L", Formula::negation(Formula::reference("L")))
///     .build()
///     .unwrap();
///
/// let solution = FixedPointSolver::default_config().solve(&graph).unwrap();
/// assert_eq!(solution.value("L"), Some(TruthValue::Both));
/// assert!(solution.rounds() <= 3);
/// ```
#[derive(Debug, Clone)]
pub struct FixedPointSolver<O = Belnap> {
    config: SolverConfig,
    ops: O,
}

impl FixedPointSolver<Belnap> {
    /// Create a solver over the B4 connectives
    pub fn new(config: SolverConfig) -> Self {
        Self::with_operators(config, Belnap)
    }

    /// Create a solver with default configuration
    pub fn default_config() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<O: Operators> FixedPointSolver<O> {
    /// Create a solver over a custom connective algebra
    pub fn with_operators(config: SolverConfig, ops: O) -> Self {
        Self { config, ops }
    }

    /// Get the configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Get the connective algebra
    pub fn operators(&self) -> &O {
        &self.ops
    }

    /// New value of one sentence: its previous value joined with its formula
    /// evaluated on the frozen snapshot
    pub fn update(&self, graph: &SentenceGraph, sentence: &Sentence, snapshot: &Assignment) -> TruthValue {
        let candidate = match self.config.grounding {
            Grounding::ClosedWorld => sentence
                .formula()
                .evaluate(
                    &self.ops,
                    &CycleClosed {
                        graph,
                        reader: sentence.name(),
                        snapshot,
                    },
                ),
            Grounding::Open => sentence.formula().evaluate(&self.ops, snapshot),
        };
        snapshot.value_of(sentence.name()).join(candidate)
    }

    /// Run one synchronous round over the whole graph
    ///
    /// Every sentence reads `previous` only; nothing computed in this round is
    /// visible to the rest of the round.
    pub fn step(&self, graph: &SentenceGraph, previous: &Assignment) -> RoundOutcome {
        let next: Assignment = graph
            .sentences()
            .map(|sentence| (sentence.name().to_string(), self.update(graph, sentence, previous)))
            .collect();

        RoundOutcome::between(previous, next)
    }

    /// Check the connective algebra if the configuration asks for it
    pub fn verify(&self) -> Result<()> {
        if !self.config.verify_operators {
            return Ok(());
        }
        let violations = monotonicity_violations(&self.ops);
        match violations.first() {
            None => Ok(()),
            Some(first) => Err(EngineError::NonMonotoneOperator(format!(
                "{} ({} violation(s) in total)",
                first,
                violations.len()
            ))),
        }
    }

    /// Begin a run that can be advanced round by round
    pub fn start<'a>(&'a self, graph: &'a SentenceGraph) -> SolverRun<'a, O> {
        SolverRun::new(self, graph)
    }

    /// Solve the graph to a stable assignment
    ///
    /// # Errors
    ///
    /// - `NonMonotoneOperator` if verification is enabled and fails
    /// - `NonConvergence` if the round bound is reached first
    pub fn solve(&self, graph: &SentenceGraph) -> Result<Solution> {
        self.verify()?;
        self.start(graph).finish()
    }
}

/// Closed-world view restricted to the reader's own cycle: an unvalued
/// sentence on the same dependency cycle as `reader` reads as False, every
/// other reference reads exactly
struct CycleClosed<'a> {
    graph: &'a SentenceGraph,
    reader: &'a str,
    snapshot: &'a Assignment,
}

impl Valuation for CycleClosed<'_> {
    fn value_of(&self, name: &str) -> TruthValue {
        if self.graph.share_cycle(self.reader, name) {
            ClosedWorld(self.snapshot).value_of(name)
        } else {
            self.snapshot.value_of(name)
        }
    }
}

/// Solve with B4 connectives and default settings apart from the round bound
pub fn solve(graph: &SentenceGraph, max_iterations: Option<usize>) -> Result<Assignment> {
    let mut config = SolverConfig::default();
    config.max_iterations = max_iterations;
    FixedPointSolver::new(config)
        .solve(graph)
        .map(|solution| solution.assignment)
}

/// A solver run in progress
///
/// Owns the current assignment; each round replaces it with a fresh one.
pub struct SolverRun<'a, O> {
    solver: &'a FixedPointSolver<O>,
    graph: &'a SentenceGraph,
    state: SolverState,
    current: Assignment,
    max_iterations: usize,
    trace: Vec<Assignment>,
    metrics: SolveMetrics,
    started: Instant,
}

impl<'a, O: Operators> SolverRun<'a, O> {
    fn new(solver: &'a FixedPointSolver<O>, graph: &'a SentenceGraph) -> Self {
        let current = graph.bottom();
        let trace = if solver.config.record_trace {
            vec![current.clone()]
        } else {
            Vec::new()
        };

        Self {
            solver,
            graph,
            state: SolverState::Initializing,
            current,
            max_iterations: solver.config.effective_max_iterations(graph.len()),
            trace,
            metrics: SolveMetrics::new(),
            started: Instant::now(),
        }
    }

    /// Current state of the run
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Assignment after the last completed round
    pub fn current(&self) -> &Assignment {
        &self.current
    }

    /// Rounds completed so far
    pub fn rounds(&self) -> usize {
        self.metrics.rounds
    }

    /// Run one more round unless the run has ended; returns the new state
    pub fn advance(&mut self) -> SolverState {
        if self.needs_round() {
            let outcome = self.solver.step(self.graph, &self.current);
            self.apply(outcome);
        }
        self.state
    }

    /// Whether another round must run; settles the terminal states that need
    /// no round (empty graph, exhausted bound)
    pub(crate) fn needs_round(&mut self) -> bool {
        match self.state {
            state if state.is_terminal() => false,
            SolverState::Initializing if self.graph.is_empty() => {
                tracing::debug!("Empty sentence graph, nothing to solve");
                self.state = SolverState::Stable;
                false
            }
            _ if self.metrics.rounds >= self.max_iterations => {
                tracing::warn!(
                    "No convergence after {} rounds ({} sentences); operators may not be monotone",
                    self.metrics.rounds,
                    self.graph.len()
                );
                self.state = SolverState::NonConvergent;
                false
            }
            _ => true,
        }
    }

    /// Replace the current assignment with the outcome of a round
    pub(crate) fn apply(&mut self, outcome: RoundOutcome) {
        self.metrics.record_round(&outcome.changed);
        let round = self.metrics.rounds;
        let fixed = outcome.is_fixed();
        self.current = outcome.next;

        if fixed {
            tracing::info!(
                "Stable after {} rounds ({} sentences)",
                round,
                self.graph.len()
            );
            self.state = SolverState::Stable;
        } else {
            tracing::debug!("Round {}: {} sentence(s) changed", round, outcome.changed.len());
            if self.solver.config.record_trace {
                self.trace.push(self.current.clone());
            }
            self.state = SolverState::Iterating { round };
        }
    }

    /// Drive the run to a terminal state and return its result
    pub fn finish(mut self) -> Result<Solution> {
        while self.needs_round() {
            let outcome = self.solver.step(self.graph, &self.current);
            self.apply(outcome);
        }
        self.metrics.elapsed_micros = self.started.elapsed().as_micros();

        match self.state {
            SolverState::Stable => {
                self.metrics.record_final(&self.current);
                Ok(Solution {
                    assignment: self.current,
                    state: self.state,
                    trace: self.trace,
                    metrics: self.metrics,
                })
            }
            _ => Err(EngineError::NonConvergence {
                max_iterations: self.max_iterations,
                last: Box::new(self.current),
            }),
        }
    }
}
