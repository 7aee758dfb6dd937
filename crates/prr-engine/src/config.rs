//! Solver configuration
//!
//! Controls the iteration guard, how unvalued references are read, and
//! diagnostics.

use serde::{Deserialize, Serialize};

/// How a reference to a sentence that is still Neither is read during evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grounding {
    /// An unvalued sentence read from within its own dependency cycle reads as
    /// False, the reading the confidence projection applies to it; every other
    /// reference reads exactly. The Liar goes Neither -> True -> Both.
    #[default]
    ClosedWorld,

    /// References read the snapshot exactly; the solver computes the least
    /// fixed point and the Liar stays Neither.
    Open,
}

impl Grounding {
    /// Get the grounding name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Grounding::ClosedWorld => "closed-world",
            Grounding::Open => "open",
        }
    }
}

impl std::str::FromStr for Grounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closed-world" | "closed_world" | "closed" => Ok(Grounding::ClosedWorld),
            "open" => Ok(Grounding::Open),
            _ => Err(format!("Invalid grounding: {}", s)),
        }
    }
}

/// Configuration for a solver run
///
/// # Examples
///
/// ```
/// use prr_engine::{Grounding, SolverConfig};
///
/// // Default: closed-world grounding, bound derived from the graph size
/// let config = SolverConfig::default();
/// assert_eq!(config.grounding, Grounding::ClosedWorld);
/// assert_eq!(config.effective_max_iterations(3), 8);
///
/// // Strict: least fixed point with operator verification
/// let config = SolverConfig::strict();
/// assert_eq!(config.grounding, Grounding::Open);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Safety bound on the number of rounds
    /// Default: None, meaning `2N + 2` for a graph of N sentences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,

    /// Reading of references to still-unvalued sentences
    /// Default: closed-world
    #[serde(default)]
    pub grounding: Grounding,

    /// Keep every intermediate assignment in the solution
    /// Default: false
    #[serde(default)]
    pub record_trace: bool,

    /// Reject operator sets that are not monotone before solving
    /// Default: false
    #[serde(default)]
    pub verify_operators: bool,

    /// Number of evaluation tasks per round for the parallel solver
    /// Default: 4
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            grounding: Grounding::ClosedWorld,
            record_trace: false,
            verify_operators: false,
            workers: default_workers(),
        }
    }
}

impl SolverConfig {
    /// Least-fixed-point configuration with operator verification
    pub fn strict() -> Self {
        Self {
            grounding: Grounding::Open,
            verify_operators: true,
            ..Self::default()
        }
    }

    /// Default configuration that also records every round
    pub fn diagnostic() -> Self {
        Self {
            record_trace: true,
            verify_operators: true,
            ..Self::default()
        }
    }

    /// Set the round bound
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the grounding
    pub fn with_grounding(mut self, grounding: Grounding) -> Self {
        self.grounding = grounding;
        self
    }

    /// Round bound for a graph of `sentences` sentences
    ///
    /// The default is one more than the proven `2N + 1`, so a correct run can
    /// never hit it.
    pub fn effective_max_iterations(&self, sentences: usize) -> usize {
        self.max_iterations.unwrap_or(2 * sentences + 2)
    }
}
