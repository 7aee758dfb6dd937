//! Projection of stable truth values onto confidence intervals
//!
//! | Value   | Interval   |
//! |---------|------------|
//! | True    | [1.0, 1.0] |
//! | False   | [0.0, 0.0] |
//! | Both    | [0.0, 1.0] |
//! | Neither | [0.0, 0.0] |
//!
//! Neither and False share an interval: for aggregation purposes no evidence
//! counts the same as evidence against. This mapping is fixed for the four
//! discrete values only.

use crate::{Assignment, ConfidenceInterval, TruthValue};
use std::collections::BTreeMap;

/// Pure mapping from truth values to confidence intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceProjector;

impl ConfidenceProjector {
    /// Interval for a single value
    pub fn project_value(&self, value: TruthValue) -> ConfidenceInterval {
        match value {
            TruthValue::True => ConfidenceInterval::CERTAIN,
            TruthValue::False => ConfidenceInterval::IMPOSSIBLE,
            TruthValue::Both => ConfidenceInterval::UNIT,
            TruthValue::Neither => ConfidenceInterval::IMPOSSIBLE,
        }
    }

    /// Interval for every sentence of an assignment
    pub fn project(&self, assignment: &Assignment) -> Projection {
        Projection {
            intervals: assignment
                .iter()
                .map(|(name, value)| (name.to_string(), self.project_value(value)))
                .collect(),
        }
    }
}

/// Project an assignment with the standard projector
pub fn project(assignment: &Assignment) -> Projection {
    ConfidenceProjector.project(assignment)
}

/// Name-ordered mapping from sentence name to confidence interval
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    intervals: BTreeMap<String, ConfidenceInterval>,
}

impl Projection {
    /// Interval of a sentence
    pub fn get(&self, name: &str) -> Option<ConfidenceInterval> {
        self.intervals.get(name).copied()
    }

    /// Iterate over `(name, interval)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ConfidenceInterval)> + '_ {
        self.intervals.iter().map(|(name, ci)| (name.as_str(), *ci))
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether there are no sentences
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Smallest interval covering every sentence, `None` when empty
    pub fn hull(&self) -> Option<ConfidenceInterval> {
        self.intervals.values().copied().reduce(|acc, ci| acc.hull(&ci))
    }
}
