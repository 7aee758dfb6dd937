//! PRR Engine
//!
//! Builds graphs of self-referential sentences and solves them to a stable
//! four-valued assignment.
//!
//! # Overview
//!
//! The engine is responsible for:
//! - **Graph construction**: validating named definitions (every reference must
//!   resolve) and answering dependency queries
//! - **Fixed-point solving**: synchronous rounds of evaluate-then-join until a
//!   round changes nothing
//! - **Parallel solving**: the same rounds split across blocking tasks on tokio
//! - **Definition files**: TOML and JSON sentence definitions
//! - **Metrics collection**: rounds, changes per sentence, final values
//!
//! # Convergence
//!
//! Values only move up the information lattice (Neither, then True or False,
//! then Both). With N sentences a run stabilizes within `2N + 1` rounds:
//!
//! | Sentence | Definition | Stable value | Rounds |
//! |----------|------------|--------------|--------|
//! | Liar | `L = ¬L` | Both | 3 |
//! | Mutual | `A = ¬B`, `B = ¬A` | Both, Both | 3 |
//! | Conjunction | `C = true ∧ false` | False | 2 |
//!
//! # Usage
//!
//! ```
//! use prr_domain::{Formula, TruthValue};
//! use prr_engine::{solve, SentenceGraph};
//!
//! let graph = SentenceGraph::builder()
//!     .define("L", Formula::negation(Formula::reference("L")))
//!     .define(
//!         "C",
//!         Formula::conjunction(
//!             Formula::literal(TruthValue::True),
//!             Formula::literal(TruthValue::False),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let assignment = solve(&graph, None).unwrap();
//! assert_eq!(assignment.get("L"), Some(TruthValue::Both));
//! assert_eq!(assignment.get("C"), Some(TruthValue::False));
//!
//! let projection = prr_domain::project(&assignment);
//! assert_eq!(projection.get("L").unwrap().as_pair(), [0.0, 1.0]);
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use prr_engine::SolverConfig;
//!
//! // Default: closed-world grounding, bound 2N + 2
//! let config = SolverConfig::default();
//!
//! // Strict: least fixed point, operators checked for monotonicity
//! let config = SolverConfig::strict();
//!
//! // Diagnostic: every round kept in the solution
//! let config = SolverConfig::diagnostic();
//! ```
//!
//! # Configuration
//!
//! The solver can be configured via TOML:
//!
//! ```toml
//! [solver]
//! grounding = "closed-world"
//! max_iterations = 64
//! record_trace = false
//! verify_operators = false
//! workers = 4
//! ```

#![warn(missing_docs)]

mod config;
mod definitions;
mod error;
mod graph;
mod metrics;
mod solver;
mod worker;

pub use config::{Grounding, SolverConfig};
pub use definitions::{
    load_definitions, parse_json, parse_toml, DefinitionFile, FormulaSpec, SentenceSpec,
};
pub use error::{EngineError, Result};
pub use graph::{GraphBuilder, Sentence, SentenceGraph};
pub use metrics::SolveMetrics;
pub use solver::{solve, FixedPointSolver, RoundOutcome, Solution, SolverRun, SolverState};
pub use worker::ParallelSolver;
