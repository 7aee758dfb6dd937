//! Error types for graph construction and solving

use prr_domain::Assignment;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while building a sentence graph or solving it
///
/// Construction errors leave nothing behind: no partial graph is ever returned.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A formula references a sentence that is not defined in the same graph
    #[error("Undefined reference: sentence '{sentence}' references unknown sentence '{reference}'")]
    UndefinedReference {
        /// Sentence whose formula holds the reference
        sentence: String,
        /// The name that did not resolve
        reference: String,
    },

    /// A formula or sentence name is ill-formed
    #[error("Malformed formula in sentence '{sentence}': {reason}")]
    MalformedFormula {
        /// Sentence being defined
        sentence: String,
        /// What is wrong with it
        reason: String,
    },

    /// The same sentence name was defined more than once
    #[error("Duplicate sentence: '{0}' is defined more than once")]
    DuplicateSentence(String),

    /// The iteration bound was exceeded before the assignment stabilized
    ///
    /// Carries the last (non-stable) assignment for diagnostics.
    #[error("No convergence after {max_iterations} rounds")]
    NonConvergence {
        /// The bound that was exceeded
        max_iterations: usize,
        /// Last assignment computed before giving up
        last: Box<Assignment>,
    },

    /// A custom operator set failed the monotonicity check
    #[error("Non-monotone operator: {0}")]
    NonMonotoneOperator(String),

    /// A definition file could not be parsed
    #[error("Definition error: {0}")]
    Definitions(String),

    /// I/O error while reading definitions
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A worker task failed (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

impl EngineError {
    /// Whether the error was raised while building a graph
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            EngineError::UndefinedReference { .. }
                | EngineError::MalformedFormula { .. }
                | EngineError::DuplicateSentence(_)
                | EngineError::Definitions(_)
        )
    }

    /// The last assignment carried by a `NonConvergence` error
    pub fn last_assignment(&self) -> Option<&Assignment> {
        match self {
            EngineError::NonConvergence { last, .. } => Some(&**last),
            _ => None,
        }
    }
}
