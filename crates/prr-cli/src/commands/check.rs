//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output::Formatter;
use prr_engine::{load_definitions, DefinitionFile, SentenceGraph};
use serde::Serialize;

/// Structure of a valid definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// File that was checked
    pub file: String,

    /// Number of sentences
    pub sentences: usize,

    /// Sentences that reference themselves directly
    pub self_referential: Vec<String>,

    /// Strongly connected components that contain a cycle
    pub cycles: Vec<Vec<String>>,

    /// Whether the dependency graph has no cycles
    pub acyclic: bool,

    /// Total expression-tree nodes over all formulas
    pub formula_nodes: usize,

    /// Maximum rounds a solver run can take
    pub convergence_bound: usize,
}

impl CheckReport {
    /// Describe a graph loaded from `file`
    pub fn new(file: impl Into<String>, graph: &SentenceGraph) -> Self {
        let cycles: Vec<Vec<String>> = graph
            .cycles()
            .into_iter()
            .map(|cycle| cycle.into_iter().map(str::to_string).collect())
            .collect();

        Self {
            file: file.into(),
            sentences: graph.len(),
            self_referential: graph
                .names()
                .filter(|name| graph.is_self_referential(name))
                .map(str::to_string)
                .collect(),
            acyclic: graph.is_acyclic(),
            cycles,
            formula_nodes: graph.sentences().map(|s| s.formula().size()).sum(),
            convergence_bound: graph.convergence_bound(),
        }
    }
}

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, formatter: &Formatter) -> Result<()> {
    let graph = load_definitions(&args.file)?;
    let report = CheckReport::new(args.file.display().to_string(), &graph);

    println!("{}", formatter.format_check(&report)?);

    if args.normalize {
        println!("{}", DefinitionFile::from_graph(&graph).to_toml()?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prr_domain::Formula;

    #[test]
    fn test_report() {
        let graph = SentenceGraph::builder()
            .define("A", Formula::negation(Formula::reference("B")))
            .define("B", Formula::negation(Formula::reference("A")))
            .define("L", Formula::negation(Formula::reference("L")))
            .define("T", Formula::reference("L"))
            .build()
            .unwrap();

        let report = CheckReport::new("defs.toml", &graph);
        assert_eq!(report.sentences, 4);
        assert_eq!(report.self_referential, vec!["L"]);
        assert_eq!(report.cycles, vec![vec!["A", "B"], vec!["L"]]);
        assert!(!report.acyclic);
        assert_eq!(report.convergence_bound, 9);
        // not(ref) per cyclic sentence, ref for T
        assert_eq!(report.formula_nodes, 7);
    }
}
