//! Sentence graph: named sentences and the dependencies between them

use crate::{EngineError, Result};
use prr_domain::{Assignment, Formula, LATTICE_HEIGHT};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A named sentence and its defining formula
///
/// The sentence carries no current value; values live only in the
/// [`Assignment`] of a solver round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    name: String,
    formula: Formula,
}

impl Sentence {
    /// Sentence name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defining formula
    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

/// Immutable set of sentences whose references all resolve
///
/// Cycles, including direct self-reference, are allowed. Once built the graph
/// is read-only and can be shared freely between threads and solver runs.
#[derive(Debug, Clone)]
pub struct SentenceGraph {
    /// Sentences sorted by name
    sentences: Vec<Sentence>,
    /// Name -> position in `sentences`
    index: HashMap<String, usize>,
    /// Outgoing dependency edges per sentence, sorted and deduplicated
    edges: Vec<Vec<usize>>,
    /// Cycle each sentence lies on, as an index into the cyclic components
    cycle: Vec<Option<usize>>,
}

impl SentenceGraph {
    /// Start building a graph
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build a graph from `(name, formula)` definitions
    ///
    /// # Errors
    ///
    /// - `MalformedFormula` if a sentence name or a referenced name is blank
    /// - `DuplicateSentence` if a name is defined twice
    /// - `UndefinedReference` if a formula references an unknown name
    pub fn from_definitions<I, S>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Formula)>,
        S: Into<String>,
    {
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut seen = BTreeSet::new();

        for (name, formula) in definitions {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(EngineError::MalformedFormula {
                    sentence: name,
                    reason: "sentence name is empty".to_string(),
                });
            }
            if !seen.insert(name.clone()) {
                return Err(EngineError::DuplicateSentence(name));
            }
            sentences.push(Sentence { name, formula });
        }

        sentences.sort_by(|a, b| a.name.cmp(&b.name));

        let index: HashMap<String, usize> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        let mut edges = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            let mut targets = Vec::new();
            for reference in sentence.formula.references() {
                if reference.trim().is_empty() {
                    return Err(EngineError::MalformedFormula {
                        sentence: sentence.name.clone(),
                        reason: "reference to an empty sentence name".to_string(),
                    });
                }
                match index.get(reference) {
                    Some(&target) => targets.push(target),
                    None => {
                        return Err(EngineError::UndefinedReference {
                            sentence: sentence.name.clone(),
                            reference: reference.to_string(),
                        })
                    }
                }
            }
            targets.sort_unstable();
            edges.push(targets);
        }

        let mut cycle = vec![None; sentences.len()];
        for (id, component) in cyclic_components(&edges).into_iter().enumerate() {
            for i in component {
                cycle[i] = Some(id);
            }
        }

        Ok(Self {
            sentences,
            index,
            edges,
            cycle,
        })
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether the graph has no sentences
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Look up a sentence by name
    pub fn get(&self, name: &str) -> Option<&Sentence> {
        self.index.get(name).map(|&i| &self.sentences[i])
    }

    /// Whether a sentence called `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All sentences, in name order
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> + '_ {
        self.sentences.iter()
    }

    /// All sentence names, in name order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentences.iter().map(|s| s.name.as_str())
    }

    /// Sentences referenced by `name`'s formula, or `None` if `name` is unknown
    pub fn dependencies(&self, name: &str) -> Option<Vec<&str>> {
        let &i = self.index.get(name)?;
        Some(self.edges[i].iter().map(|&j| self.sentences[j].name.as_str()).collect())
    }

    /// Sentences whose formulas reference `name`
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let Some(&target) = self.index.get(name) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, targets)| targets.binary_search(&target).is_ok())
            .map(|(i, _)| self.sentences[i].name.as_str())
            .collect()
    }

    /// Whether `name`'s formula references `name` itself
    pub fn is_self_referential(&self, name: &str) -> bool {
        self.index
            .get(name)
            .is_some_and(|&i| self.edges[i].binary_search(&i).is_ok())
    }

    /// Groups of mutually dependent sentences (strongly connected components
    /// that contain a cycle), each sorted by name
    ///
    /// A self-referential sentence forms a cycle on its own.
    pub fn cycles(&self) -> Vec<Vec<&str>> {
        let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (sentence, cycle) in self.sentences.iter().zip(&self.cycle) {
            if let Some(id) = cycle {
                groups.entry(*id).or_default().push(sentence.name.as_str());
            }
        }
        let mut cycles: Vec<Vec<&str>> = groups.into_values().collect();
        cycles.sort();
        cycles
    }

    /// Whether `name` lies on a dependency cycle (self-reference included)
    pub fn is_cyclic(&self, name: &str) -> bool {
        self.cycle_of(name).is_some()
    }

    /// Whether `a` and `b` lie on the same dependency cycle
    ///
    /// False whenever either name is unknown or off every cycle.
    pub fn share_cycle(&self, a: &str, b: &str) -> bool {
        match (self.cycle_of(a), self.cycle_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Whether the dependency graph has no cycles at all
    pub fn is_acyclic(&self) -> bool {
        self.cycle.iter().all(Option::is_none)
    }

    fn cycle_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).and_then(|&i| self.cycle[i])
    }

    /// Upper bound on solver rounds: `2N + 1`
    ///
    /// Each sentence can change at most [`LATTICE_HEIGHT`] times, every round
    /// but the last changes at least one sentence, and the last round confirms
    /// stability.
    pub fn convergence_bound(&self) -> usize {
        LATTICE_HEIGHT * self.len() + 1
    }

    /// Initial assignment: every sentence at Neither
    pub fn bottom(&self) -> Assignment {
        Assignment::bottom(self.names())
    }

    pub(crate) fn sentence_at(&self, i: usize) -> &Sentence {
        &self.sentences[i]
    }
}

/// Incremental builder for [`SentenceGraph`]
///
/// # Examples
///
/// ```
/// use prr_domain::Formula;
/// use prr_engine::SentenceGraph;
///
/// let graph = SentenceGraph::builder()
///     .define("L", Formula::negation(Formula::reference("L")))
///     .build()
///     .unwrap();
/// assert!(graph.is_self_referential("L"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    definitions: Vec<(String, Formula)>,
}

impl GraphBuilder {
    /// Add a sentence definition
    pub fn define(mut self, name: impl Into<String>, formula: Formula) -> Self {
        self.definitions.push((name.into(), formula));
        self
    }

    /// Number of definitions added so far
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definitions were added
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Validate the definitions and build the graph
    pub fn build(self) -> Result<SentenceGraph> {
        SentenceGraph::from_definitions(self.definitions)
    }
}

/// Strongly connected components that contain a cycle: more than one member,
/// or a single member with an edge to itself
fn cyclic_components(edges: &[Vec<usize>]) -> Vec<Vec<usize>> {
    Tarjan::new(edges)
        .components()
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => edges[*single].binary_search(single).is_ok(),
            _ => true,
        })
        .collect()
}

/// Tarjan's strongly connected components over index adjacency lists
///
/// The depth-first search keeps its own frame stack, so chains of any length
/// are walked without growing the thread stack.
struct Tarjan<'g> {
    edges: &'g [Vec<usize>],
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    components: Vec<Vec<usize>>,
}

impl<'g> Tarjan<'g> {
    fn new(edges: &'g [Vec<usize>]) -> Self {
        let n = edges.len();
        Self {
            edges,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn components(mut self) -> Vec<Vec<usize>> {
        for v in 0..self.edges.len() {
            if self.index[v].is_none() {
                self.visit(v);
            }
        }
        self.components
    }

    fn open(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    fn visit(&mut self, root: usize) {
        let edges = self.edges;
        // (sentence, position of the next edge to follow)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.open(root);

        while let Some(frame) = frames.last_mut() {
            let (v, next) = *frame;

            if let Some(&w) = edges[v].get(next) {
                frame.1 += 1;
                match self.index[w] {
                    None => {
                        self.open(w);
                        frames.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
            }

            if self.index[v] == Some(self.lowlink[v]) {
                let mut component = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prr_domain::TruthValue;

    fn not(name: &str) -> Formula {
        Formula::negation(Formula::reference(name))
    }

    #[test]
    fn test_liar_graph() {
        let graph = SentenceGraph::builder().define("L", not("L")).build().unwrap();

        assert_eq!(graph.len(), 1);
        assert!(graph.is_self_referential("L"));
        assert_eq!(graph.cycles(), vec![vec!["L"]]);
        assert_eq!(graph.convergence_bound(), 3);
        assert_eq!(graph.bottom().get("L"), Some(TruthValue::Neither));
    }

    #[test]
    fn test_mutual_reference_is_one_cycle() {
        let graph = SentenceGraph::builder()
            .define("A", not("B"))
            .define("B", not("A"))
            .build()
            .unwrap();

        assert!(!graph.is_self_referential("A"));
        assert!(graph.is_cyclic("A") && graph.is_cyclic("B"));
        assert_eq!(graph.cycles(), vec![vec!["A", "B"]]);
        assert_eq!(graph.dependencies("A"), Some(vec!["B"]));
        assert_eq!(graph.dependents("A"), vec!["B"]);
    }

    #[test]
    fn test_acyclic_graph() {
        let graph = SentenceGraph::builder()
            .define(
                "C",
                Formula::conjunction(
                    Formula::literal(TruthValue::True),
                    Formula::literal(TruthValue::False),
                ),
            )
            .define("D", not("C"))
            .build()
            .unwrap();

        assert!(graph.is_acyclic());
        assert!(!graph.is_cyclic("D"));
        assert_eq!(graph.dependencies("C"), Some(vec![]));
        assert_eq!(graph.dependencies("missing"), None);
        assert_eq!(graph.dependents("C"), vec!["D"]);
    }

    #[test]
    fn test_undefined_reference_fails_construction() {
        let result = SentenceGraph::builder()
            .define("A", not("B"))
            .define("C", Formula::literal(TruthValue::True))
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
    fn test_duplicate_sentence() {
        let result = SentenceGraph::from_definitions([
            ("A", Formula::literal(TruthValue::True)),
            ("A", Formula::literal(TruthValue::False)),
        ]);
        assert!(matches!(result, Err(EngineError::DuplicateSentence(name)) if name == "A"));
    }

    #[test]
    fn test_blank_names_are_malformed() {
        let result = SentenceGraph::from_definitions([(" ", Formula::literal(TruthValue::True))]);
        assert!(matches!(result, Err(EngineError::MalformedFormula { .. })));

        let result = SentenceGraph::from_definitions([("A", Formula::reference(""))]);
        match result {
            Err(EngineError::MalformedFormula { sentence, .. }) => assert_eq!(sentence, "A"),
            other => panic!("Expected MalformedFormula, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = SentenceGraph::builder().build().unwrap();
        assert!(graph.is_empty());
        assert!(graph.is_acyclic());
        assert_eq!(graph.convergence_bound(), 1);
        assert!(graph.bottom().is_empty());
    }

    #[test]
    fn test_cycles_ignore_tails() {
        // A -> B -> C -> B, D -> D, E -> A
        let graph = SentenceGraph::builder()
            .define("A", Formula::reference("B"))
            .define("B", Formula::reference("C"))
            .define("C", not("B"))
            .define("D", Formula::disjunction(Formula::reference("D"), Formula::reference("A")))
            .define("E", Formula::reference("A"))
            .build()
            .unwrap();

        assert_eq!(graph.cycles(), vec![vec!["B", "C"], vec!["D"]]);
        assert!(graph.is_self_referential("D"));
        assert!(!graph.is_self_referential("E"));
        assert!(!graph.is_cyclic("A") && !graph.is_cyclic("E"));
        assert!(graph.is_cyclic("C"));
        assert!(!graph.is_cyclic("missing"));
        assert!(graph.share_cycle("B", "C"));
        assert!(graph.share_cycle("D", "D"));
        assert!(!graph.share_cycle("C", "D"));
        assert!(!graph.share_cycle("A", "B"));
        assert!(!graph.share_cycle("A", "A"));
        assert_eq!(graph.names().collect::<Vec<_>>(), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_long_chain_builds_without_deep_recursion() {
        // S000000 -> S000001 -> ... -> last, which is a literal
        let length = 100_000;
        let name = |i: usize| format!("S{:06}", i);
        let definitions = (0..length).map(|i| {
            let formula = if i + 1 == length {
                Formula::literal(TruthValue::True)
            } else {
                Formula::reference(name(i + 1))
            };
            (name(i), formula)
        });

        let graph = SentenceGraph::from_definitions(definitions).unwrap();
        assert_eq!(graph.len(), length);
        assert!(graph.is_acyclic());
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn test_long_cycle_is_one_component() {
        let length = 50_000;
        let name = |i: usize| format!("S{:06}", i);
        let definitions =
            (0..length).map(|i| (name(i), Formula::reference(name((i + 1) % length))));

        let graph = SentenceGraph::from_definitions(definitions).unwrap();
        let cycles = graph.cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), length);
        assert!(graph.share_cycle("S000000", "S049999"));
    }
}
