//! Integration tests for prr-engine
//!
//! These tests run whole graphs through construction, solving and projection.

use prr_domain::{project, Formula, Lattice, TruthValue};
use prr_engine::{
    solve, EngineError, FixedPointSolver, Grounding, ParallelSolver, SentenceGraph, SolverConfig,
};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;
use TruthValue::{Both, False, Neither, True};

fn not(name: &str) -> Formula {
    Formula::negation(Formula::reference(name))
}

#[test]
fn test_liar() {
    let graph = SentenceGraph::builder().define("L", not("L")).build().unwrap();
    let solution = FixedPointSolver::default_config().solve(&graph).unwrap();

    assert_eq!(solution.value("L"), Some(Both));
    assert!(solution.rounds() <= 3, "Liar should settle within 3 rounds");
}

#[test]
fn test_mutual_negation() {
    let graph = SentenceGraph::builder()
        .define("A", not("B"))
        .define("B", not("A"))
        .build()
        .unwrap();
    let assignment = solve(&graph, None).unwrap();

    assert_eq!(assignment.get("A"), Some(Both));
    assert_eq!(assignment.get("B"), Some(Both));
}

#[test]
fn test_constant_conjunction() {
    let graph = SentenceGraph::builder()
        .define("C", Formula::conjunction(Formula::literal(True), Formula::literal(False)))
        .build()
        .unwrap();
    let solution = FixedPointSolver::default_config().solve(&graph).unwrap();

    assert_eq!(solution.value("C"), Some(False));
    assert_eq!(solution.changing_rounds(), 1);
    assert_eq!(solution.rounds(), 2);
}

#[test]
fn test_projection_of_solved_graph() {
    let graph = SentenceGraph::builder()
        .define("L", not("L"))
        .define("C", Formula::conjunction(Formula::literal(True), Formula::literal(False)))
        .define("T", Formula::literal(True))
        .build()
        .unwrap();
    let solution = FixedPointSolver::default_config().solve(&graph).unwrap();
    let projection = solution.projection();

    assert_eq!(projection.get("L").unwrap().as_pair(), [0.0, 1.0]);
    assert_eq!(projection.get("C").unwrap().as_pair(), [0.0, 0.0]);
    assert_eq!(projection.get("T").unwrap().as_pair(), [1.0, 1.0]);
    assert_eq!(projection.len(), 3);
}

#[test]
fn test_gap_and_false_project_identically() {
    let graph = SentenceGraph::builder().define("L", not("L")).build().unwrap();
    let solver = FixedPointSolver::new(SolverConfig::strict());
    let gap = solver.solve(&graph).unwrap();
    assert_eq!(gap.value("L"), Some(Neither));

    let falsehood: prr_domain::Assignment = [("L", False)].into_iter().collect();
    assert_eq!(project(&gap.assignment), project(&falsehood));
}

#[test]
fn test_undefined_reference_builds_nothing() {
    let result = SentenceGraph::builder()
        .define("A", Formula::reference("B"))
        .define("C", Formula::literal(True))
        .build();

    match result {
        Err(EngineError::UndefinedReference { sentence, reference }) => {
            assert_eq!(sentence, "A");
            assert_eq!(reference, "B");
        }
        other => panic!("Expected UndefinedReference, got {:?}", other),
    }
}

#[test]
fn test_acyclic_chain_uses_the_same_rounds() {
    // D depends on C depends on B depends on A; values ripple one level per round
    let graph = SentenceGraph::builder()
        .define("A", Formula::literal(True))
        .define("B", not("A"))
        .define("C", not("B"))
        .define("D", Formula::disjunction(Formula::reference("C"), Formula::literal(False)))
        .build()
        .unwrap();
    assert!(graph.is_acyclic());

    let solution = FixedPointSolver::new(SolverConfig::strict()).solve(&graph).unwrap();
    assert_eq!(solution.value("B"), Some(False));
    assert_eq!(solution.value("D"), Some(True));
    assert_eq!(solution.rounds(), 5);
}

#[test]
fn test_graph_is_shared_across_threads() {
    let graph = Arc::new(
        SentenceGraph::builder()
            .define("A", not("B"))
            .define("B", not("A"))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = [Grounding::ClosedWorld, Grounding::Open]
        .into_iter()
        .map(|grounding| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                let config = SolverConfig::default().with_grounding(grounding);
                FixedPointSolver::new(config).solve(&graph).unwrap().assignment
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0].get("A"), Some(Both));
    assert_eq!(results[1].get("A"), Some(Neither));
}

#[tokio::test]
async fn test_parallel_solver_on_loaded_file() {
    let toml = r#"
[[sentence]]
name = "L"
formula = { not = { ref = "L" } }

[[sentence]]
name = "K"
formula = { or = [{ ref = "L" }, { lit = "false" }, { not = { ref = "K" } }] }
"#;
    let graph = Arc::new(prr_engine::parse_toml(toml).unwrap());

    let sequential = FixedPointSolver::default_config().solve(&graph).unwrap();
    let parallel = ParallelSolver::default_config().solve(graph).await.unwrap();
    assert_eq!(parallel.assignment, sequential.assignment);
    assert_eq!(parallel.value("L"), Some(Both));
}

fn truth_value() -> impl Strategy<Value = TruthValue> {
    prop::sample::select(TruthValue::ALL.to_vec())
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("S{}", i)).collect()
}

/// Random formula whose references are drawn from `names`
fn formula_over(names: Vec<String>) -> BoxedStrategy<Formula> {
    let leaf = if names.is_empty() {
        truth_value().prop_map(Formula::literal).boxed()
    } else {
        prop_oneof![
            truth_value().prop_map(Formula::literal),
            prop::sample::select(names).prop_map(|name| Formula::reference(name)),
        ]
        .boxed()
    };

    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::negation),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::conjunction(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Formula::disjunction(l, r)),
        ]
    })
    .boxed()
}

/// Graphs where any sentence may reference any other, itself included
fn cyclic_graph() -> impl Strategy<Value = SentenceGraph> {
    (1usize..8).prop_flat_map(|n| {
        let names = names(n);
        prop::collection::vec(formula_over(names.clone()), n).prop_map(move |formulas| {
            SentenceGraph::from_definitions(names.clone().into_iter().zip(formulas)).unwrap()
        })
    })
}

/// Graphs where sentence i only references sentences before it
fn acyclic_graph() -> impl Strategy<Value = SentenceGraph> {
    (1usize..8).prop_flat_map(|n| {
        let names = names(n);
        let formulas: Vec<_> = (0..n).map(|i| formula_over(names[..i].to_vec())).collect();
        formulas.prop_map(move |formulas| {
            SentenceGraph::from_definitions(names.clone().into_iter().zip(formulas)).unwrap()
        })
    })
}

fn grounding() -> impl Strategy<Value = Grounding> {
    prop_oneof![Just(Grounding::ClosedWorld), Just(Grounding::Open)]
}

proptest! {
    /// Property: every run stabilizes within 2N + 1 rounds
    #[test]
    fn test_cyclic_graphs_stabilize_within_bound(graph in cyclic_graph(), grounding in grounding()) {
        let config = SolverConfig::default()
            .with_grounding(grounding)
            .with_max_iterations(graph.convergence_bound());
        let solution = FixedPointSolver::new(config).solve(&graph);
        prop_assert!(solution.is_ok());
        prop_assert!(solution.unwrap().rounds() <= 2 * graph.len() + 1);
    }

    /// Property: acyclic graphs go through the same bound
    #[test]
    fn test_acyclic_graphs_stabilize_within_bound(graph in acyclic_graph(), grounding in grounding()) {
        prop_assert!(graph.is_acyclic());
        let config = SolverConfig::default()
            .with_grounding(grounding)
            .with_max_iterations(graph.convergence_bound());
        prop_assert!(FixedPointSolver::new(config).solve(&graph).is_ok());
    }

    /// Property: each trace step only adds information
    #[test]
    fn test_trace_is_monotone(graph in cyclic_graph(), grounding in grounding()) {
        let config = SolverConfig::diagnostic().with_grounding(grounding);
        let solution = FixedPointSolver::new(config).solve(&graph).unwrap();

        for pair in solution.trace.windows(2) {
            prop_assert!(pair[0].leq(&pair[1]));
        }
        for (name, changes) in &solution.metrics.changes {
            prop_assert!(*changes <= 2, "{} changed {} times", name, changes);
        }
    }

    /// Property: under open grounding the result is an exact fixed point
    #[test]
    fn test_open_grounding_reaches_exact_fixed_point(graph in cyclic_graph()) {
        let solver = FixedPointSolver::new(SolverConfig::strict());
        let solution = solver.solve(&graph).unwrap();

        for sentence in graph.sentences() {
            let value = sentence.formula().evaluate(solver.operators(), &solution.assignment);
            prop_assert_eq!(Some(value), solution.value(sentence.name()));
        }
    }

    /// Property: the closed-world result dominates the least fixed point
    #[test]
    fn test_closed_world_dominates_least_fixed_point(graph in cyclic_graph()) {
        let least = FixedPointSolver::new(SolverConfig::strict()).solve(&graph).unwrap();
        let closed = FixedPointSolver::default_config().solve(&graph).unwrap();

        prop_assert!(least.assignment.leq(&closed.assignment));
        for (name, value) in closed.assignment.iter() {
            prop_assert!(least.value(name).unwrap().leq(&value));
        }
    }

    /// Property: under closed-world grounding, sentences off every cycle still
    /// equal their formula on the stable assignment
    #[test]
    fn test_closed_world_is_exact_off_cycles(graph in cyclic_graph()) {
        let solver = FixedPointSolver::default_config();
        let solution = solver.solve(&graph).unwrap();

        for sentence in graph.sentences().filter(|s| !graph.is_cyclic(s.name())) {
            let value = sentence.formula().evaluate(solver.operators(), &solution.assignment);
            prop_assert_eq!(Some(value), solution.value(sentence.name()));
        }
    }
}
