//! Metrics collected during a solver run

use prr_domain::{Assignment, TruthValue};
use std::collections::BTreeMap;

/// Metrics collected during a solver run
///
/// Tracks rounds, value changes per sentence, and the final value distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveMetrics {
    /// Rounds evaluated, including the final round that confirmed stability
    pub rounds: usize,

    /// Rounds in which at least one sentence changed value
    pub changing_rounds: usize,

    /// Value changes per sentence (at most the lattice height each)
    pub changes: BTreeMap<String, usize>,

    /// Number of sentences per final value
    pub final_values: BTreeMap<&'static str, usize>,

    /// Wall-clock time spent solving, in microseconds
    pub elapsed_micros: u128,
}

impl SolveMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed round and the sentences it changed
    pub fn record_round<S: AsRef<str>>(&mut self, changed: &[S]) {
        self.rounds += 1;
        if !changed.is_empty() {
            self.changing_rounds += 1;
        }
        for name in changed {
            *self.changes.entry(name.as_ref().to_string()).or_insert(0) += 1;
        }
    }

    /// Record the value distribution of the final assignment
    pub fn record_final(&mut self, assignment: &Assignment) {
        self.final_values.clear();
        for value in TruthValue::ALL {
            let count = assignment.count(value);
            if count > 0 {
                self.final_values.insert(value.as_str(), count);
            }
        }
    }

    /// Total value changes across all sentences
    pub fn total_changes(&self) -> usize {
        self.changes.values().sum()
    }

    /// Largest number of changes any single sentence went through
    pub fn max_changes(&self) -> usize {
        self.changes.values().copied().max().unwrap_or(0)
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Solve Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Rounds: {} ({} changing)", self.rounds, self.changing_rounds),
            format!("Value changes: {}", self.total_changes()),
            format!("Elapsed: {}µs", self.elapsed_micros),
        ];

        if !self.final_values.is_empty() {
            lines.push(String::new());
            lines.push("Final values:".to_string());
            for (value, count) in &self.final_values {
                lines.push(format!("  {}: {}", value, count));
            }
        }

        lines.join("\n")
    }
}
