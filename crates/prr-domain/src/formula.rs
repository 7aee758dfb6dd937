//! Formula module - expression trees over named sentences

use crate::{Operators, TruthValue, Valuation};
use std::collections::BTreeSet;
use std::fmt;

/// A propositional formula that may reference other sentences by name
///
/// References are resolved against a [`Valuation`] at evaluation time; a
/// formula never holds a pointer to the sentence it mentions, so cycles and
/// self-reference need no special representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A constant truth value
    Literal(TruthValue),

    /// The current value of another sentence (or of the sentence itself)
    Reference(String),

    /// Negation of a subformula
    Negation(Box<Formula>),

    /// Conjunction of two subformulas
    Conjunction(Box<Formula>, Box<Formula>),

    /// Disjunction of two subformulas
    Disjunction(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Constant formula
    pub fn literal(value: TruthValue) -> Self {
        Formula::Literal(value)
    }

    /// Reference to a sentence by name
    pub fn reference(name: impl Into<String>) -> Self {
        Formula::Reference(name.into())
    }

    /// Negation of `inner`
    pub fn negation(inner: Formula) -> Self {
        Formula::Negation(Box::new(inner))
    }

    /// Conjunction of `left` and `right`
    pub fn conjunction(left: Formula, right: Formula) -> Self {
        Formula::Conjunction(Box::new(left), Box::new(right))
    }

    /// Disjunction of `left` and `right`
    pub fn disjunction(left: Formula, right: Formula) -> Self {
        Formula::Disjunction(Box::new(left), Box::new(right))
    }

    /// Evaluate against a frozen valuation
    ///
    /// Evaluation is a plain structural fold: references are looked up, never
    /// re-evaluated, so it always terminates regardless of cycles.
    pub fn evaluate<O, V>(&self, ops: &O, valuation: &V) -> TruthValue
    where
        O: Operators + ?Sized,
        V: Valuation + ?Sized,
    {
        match self {
            Formula::Literal(value) => *value,
            Formula::Reference(name) => valuation.value_of(name),
            Formula::Negation(inner) => ops.negate(inner.evaluate(ops, valuation)),
            Formula::Conjunction(left, right) => ops.conjunction(
                left.evaluate(ops, valuation),
                right.evaluate(ops, valuation),
            ),
            Formula::Disjunction(left, right) => ops.disjunction(
                left.evaluate(ops, valuation),
                right.evaluate(ops, valuation),
            ),
        }
    }

    /// Names of every sentence this formula references, deduplicated and sorted
    pub fn references(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Formula::Literal(_) => {}
            Formula::Reference(name) => {
                names.insert(name.as_str());
            }
            Formula::Negation(inner) => inner.collect_references(names),
            Formula::Conjunction(left, right) | Formula::Disjunction(left, right) => {
                left.collect_references(names);
                right.collect_references(names);
            }
        }
    }

    /// Number of nodes in the expression tree
    pub fn size(&self) -> usize {
        match self {
            Formula::Literal(_) | Formula::Reference(_) => 1,
            Formula::Negation(inner) => 1 + inner.size(),
            Formula::Conjunction(left, right) | Formula::Disjunction(left, right) => {
                1 + left.size() + right.size()
            }
        }
    }
}

impl From<TruthValue> for Formula {
    fn from(value: TruthValue) -> Self {
        Formula::Literal(value)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Literal(value) => write!(f, "{}", value),
            Formula::Reference(name) => write!(f, "{}", name),
            Formula::Negation(inner) => write!(f, "¬{}", inner),
            Formula::Conjunction(left, right) => write!(f, "({} ∧ {})", left, right),
            Formula::Disjunction(left, right) => write!(f, "({} ∨ {})", left, right),
        }
    }
}
