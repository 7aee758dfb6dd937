//! Definition files
//!
//! A definition file lists named sentences with their formulas, in TOML or
//! JSON:
//!
//! ```toml
//! [[sentence]]
//! name = "L"
//! formula = { not = { ref = "L" } }
//!
//! [[sentence]]
//! name = "C"
//! formula = { and = [{ lit = "true" }, { lit = "false" }] }
//! ```
//!
//! `and` and `or` take one or more operands and fold left into binary nodes.

use crate::{EngineError, Result, SentenceGraph};
use prr_domain::{Formula, TruthValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of a definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Sentences in file order
    #[serde(rename = "sentence", default)]
    pub sentences: Vec<SentenceSpec>,
}

/// One named sentence as written in a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSpec {
    /// Sentence name
    pub name: String,

    /// Sentence formula
    pub formula: FormulaSpec,
}

/// Formula node as written in a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaSpec {
    /// Literal truth value (`true`, `false`, `both`, `neither` or `t`/`f`/`b`/`n`)
    Lit(String),

    /// Reference to a sentence
    Ref(String),

    /// Negation
    Not(Box<FormulaSpec>),

    /// Conjunction of one or more operands
    And(Vec<FormulaSpec>),

    /// Disjunction of one or more operands
    Or(Vec<FormulaSpec>),
}

impl FormulaSpec {
    /// Convert into a formula; `sentence` names the definition for error messages
    pub fn to_formula(&self, sentence: &str) -> Result<Formula> {
        match self {
            FormulaSpec::Lit(literal) => TruthValue::parse(literal)
                .map(Formula::literal)
                .ok_or_else(|| malformed(sentence, format!("unknown literal '{}'", literal))),
            FormulaSpec::Ref(name) => Ok(Formula::reference(name.as_str())),
            FormulaSpec::Not(inner) => Ok(Formula::negation(inner.to_formula(sentence)?)),
            FormulaSpec::And(operands) => fold(operands, sentence, "and", Formula::conjunction),
            FormulaSpec::Or(operands) => fold(operands, sentence, "or", Formula::disjunction),
        }
    }
}

impl From<&Formula> for FormulaSpec {
    fn from(formula: &Formula) -> Self {
        match formula {
            Formula::Literal(value) => FormulaSpec::Lit(value.as_str().to_string()),
            Formula::Reference(name) => FormulaSpec::Ref(name.clone()),
            Formula::Negation(inner) => FormulaSpec::Not(Box::new(inner.as_ref().into())),
            Formula::Conjunction(left, right) => {
                FormulaSpec::And(vec![left.as_ref().into(), right.as_ref().into()])
            }
            Formula::Disjunction(left, right) => {
                FormulaSpec::Or(vec![left.as_ref().into(), right.as_ref().into()])
            }
        }
    }
}

fn malformed(sentence: &str, reason: String) -> EngineError {
    EngineError::MalformedFormula {
        sentence: sentence.to_string(),
        reason,
    }
}

fn fold(
    operands: &[FormulaSpec],
    sentence: &str,
    connective: &str,
    combine: fn(Formula, Formula) -> Formula,
) -> Result<Formula> {
    let (first, rest) = operands
        .split_first()
        .ok_or_else(|| malformed(sentence, format!("'{}' needs at least one operand", connective)))?;

    rest.iter().try_fold(first.to_formula(sentence)?, |acc, operand| {
        Ok(combine(acc, operand.to_formula(sentence)?))
    })
}

impl DefinitionFile {
    /// Build the sentence graph described by the file
    pub fn to_graph(&self) -> Result<SentenceGraph> {
        let definitions = self
            .sentences
            .iter()
            .map(|spec| Ok((spec.name.clone(), spec.formula.to_formula(&spec.name)?)))
            .collect::<Result<Vec<_>>>()?;

        SentenceGraph::from_definitions(definitions)
    }

    /// Describe an existing graph, sentences in name order
    pub fn from_graph(graph: &SentenceGraph) -> Self {
        Self {
            sentences: graph
                .sentences()
                .map(|sentence| SentenceSpec {
                    name: sentence.name().to_string(),
                    formula: sentence.formula().into(),
                })
                .collect(),
        }
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::Definitions(format!("Failed to serialize definitions: {}", e)))
    }
}

/// Parse TOML definitions into a graph
pub fn parse_toml(contents: &str) -> Result<SentenceGraph> {
    let file: DefinitionFile =
        toml::from_str(contents).map_err(|e| EngineError::Definitions(e.to_string()))?;
    file.to_graph()
}

/// Parse JSON definitions into a graph
pub fn parse_json(contents: &str) -> Result<SentenceGraph> {
    let file: DefinitionFile =
        serde_json::from_str(contents).map_err(|e| EngineError::Definitions(e.to_string()))?;
    file.to_graph()
}

/// Load a definition file, choosing the format by extension (`.toml` or `.json`)
pub fn load_definitions(path: impl AsRef<Path>) -> Result<SentenceGraph> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let parse: fn(&str) -> Result<SentenceGraph> = match extension.as_deref() {
        Some("toml") => parse_toml,
        Some("json") => parse_json,
        _ => {
            return Err(EngineError::Definitions(format!(
                "{}: unsupported file type (expected .toml or .json)",
                path.display()
            )))
        }
    };

    let contents = fs::read_to_string(path)?;
    let graph = parse(&contents).map_err(|e| match e {
        EngineError::Definitions(message) => {
            EngineError::Definitions(format!("{}: {}", path.display(), message))
        }
        other => other,
    })?;

    tracing::debug!("Loaded {} sentences from {}", graph.len(), path.display());
    Ok(graph)
}
