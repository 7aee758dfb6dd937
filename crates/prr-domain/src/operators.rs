//! Logical connectives of B4
//!
//! The solver never calls the free functions directly; it evaluates formulas
//! through an [`Operators`] implementation so that alternative connective
//! tables can be plugged in and checked for monotonicity first.

use crate::lattice::Lattice;
use crate::TruthValue;
use std::fmt;

/// Negation: swaps True and False, fixes Both and Neither
pub fn negate(v: TruthValue) -> TruthValue {
    match v {
        TruthValue::True => TruthValue::False,
        TruthValue::False => TruthValue::True,
        TruthValue::Both => TruthValue::Both,
        TruthValue::Neither => TruthValue::Neither,
    }
}

/// Conjunction, as the full 16-entry B4 table
pub fn conjunction(v1: TruthValue, v2: TruthValue) -> TruthValue {
    use TruthValue::{Both, False, Neither, True};

    match (v1, v2) {
        (True, True) => True,
        (True, False) => False,
        (True, Both) => Both,
        (True, Neither) => Neither,

        (False, _) => False,

        (Both, True) => Both,
        (Both, False) => False,
        (Both, Both) => Both,
        (Both, Neither) => False,

        (Neither, True) => Neither,
        (Neither, False) => False,
        (Neither, Both) => False,
        (Neither, Neither) => Neither,
    }
}

/// Disjunction, derived by De Morgan from negation and conjunction
pub fn disjunction(v1: TruthValue, v2: TruthValue) -> TruthValue {
    negate(conjunction(negate(v1), negate(v2)))
}

/// Connective algebra used to evaluate formulas
///
/// Implementations must be monotone in the information order. The solver's
/// termination bound does not depend on it, but the meaning of the result does:
/// with non-monotone connectives the stable assignment is no longer a fixed point.
pub trait Operators {
    /// Unary negation
    fn negate(&self, v: TruthValue) -> TruthValue;

    /// Binary conjunction
    fn conjunction(&self, v1: TruthValue, v2: TruthValue) -> TruthValue;

    /// Binary disjunction (De Morgan dual of conjunction by default)
    fn disjunction(&self, v1: TruthValue, v2: TruthValue) -> TruthValue {
        self.negate(self.conjunction(self.negate(v1), self.negate(v2)))
    }
}

/// Belnap's four-valued connectives (the default algebra)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Belnap;

impl Operators for Belnap {
    fn negate(&self, v: TruthValue) -> TruthValue {
        negate(v)
    }

    fn conjunction(&self, v1: TruthValue, v2: TruthValue) -> TruthValue {
        conjunction(v1, v2)
    }

    fn disjunction(&self, v1: TruthValue, v2: TruthValue) -> TruthValue {
        disjunction(v1, v2)
    }
}

/// A place where a connective decreases the information order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonotonicityViolation {
    /// `lower ≤ upper` but `negate(lower) ≰ negate(upper)`
    Negation {
        /// Smaller input
        lower: TruthValue,
        /// Larger input
        upper: TruthValue,
    },

    /// `lower ≤ upper` but `conjunction(lower, x) ≰ conjunction(upper, x)`
    /// (or the same with the arguments swapped)
    Conjunction {
        /// Smaller input
        lower: TruthValue,
        /// Larger input
        upper: TruthValue,
        /// The fixed other operand
        other: TruthValue,
    },

    /// Same as `Conjunction`, for disjunction
    Disjunction {
        /// Smaller input
        lower: TruthValue,
        /// Larger input
        upper: TruthValue,
        /// The fixed other operand
        other: TruthValue,
    },
}

impl fmt::Display for MonotonicityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonotonicityViolation::Negation { lower, upper } => {
                write!(f, "negation is not monotone from {} to {}", lower, upper)
            }
            MonotonicityViolation::Conjunction { lower, upper, other } => write!(
                f,
                "conjunction with {} is not monotone from {} to {}",
                other, lower, upper
            ),
            MonotonicityViolation::Disjunction { lower, upper, other } => write!(
                f,
                "disjunction with {} is not monotone from {} to {}",
                other, lower, upper
            ),
        }
    }
}

/// Exhaustively check every connective of `ops` for monotonicity
///
/// Binary connectives are checked in both argument positions. Returns an
/// empty vector when the algebra is monotone.
pub fn monotonicity_violations<O: Operators + ?Sized>(ops: &O) -> Vec<MonotonicityViolation> {
    let mut violations = Vec::new();

    for lower in TruthValue::ALL {
        for upper in TruthValue::ALL {
            if !lower.leq(&upper) {
                continue;
            }

            if !ops.negate(lower).leq(&ops.negate(upper)) {
                violations.push(MonotonicityViolation::Negation { lower, upper });
            }

            for other in TruthValue::ALL {
                let conj_left = ops.conjunction(lower, other).leq(&ops.conjunction(upper, other));
                let conj_right = ops.conjunction(other, lower).leq(&ops.conjunction(other, upper));
                if !(conj_left && conj_right) {
                    violations.push(MonotonicityViolation::Conjunction { lower, upper, other });
                }

                let disj_left = ops.disjunction(lower, other).leq(&ops.disjunction(upper, other));
                let disj_right = ops.disjunction(other, lower).leq(&ops.disjunction(other, upper));
                if !(disj_left && disj_right) {
                    violations.push(MonotonicityViolation::Disjunction { lower, upper, other });
                }
            }
        }
    }

    violations
}
