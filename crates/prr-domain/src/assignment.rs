//! Assignment module - immutable round snapshots

use crate::{Lattice, TruthValue};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Read access to sentence values during formula evaluation
pub trait Valuation {
    /// Value of the sentence called `name`
    ///
    /// Names the valuation does not know read as Neither, the bottom of the
    /// information lattice.
    fn value_of(&self, name: &str) -> TruthValue;
}

/// Immutable mapping from sentence name to truth value
///
/// One assignment is one complete snapshot of a solver round. There is no way
/// to change a value in place: the solver builds a fresh assignment for every
/// round, so nothing ever observes a partially updated round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<String, TruthValue>,
}

impl Assignment {
    /// Assignment with no sentences
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bottom of the product lattice: every name mapped to Neither
    pub fn bottom<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|name| (name.into(), TruthValue::Neither))
            .collect()
    }

    /// Value of a sentence, if the assignment knows it
    pub fn get(&self, name: &str) -> Option<TruthValue> {
        self.values.get(name).copied()
    }

    /// Whether the assignment covers `name`
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no sentences
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, TruthValue)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Sentence names in order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Number of sentences holding `value`
    pub fn count(&self, value: TruthValue) -> usize {
        self.values.values().filter(|v| **v == value).count()
    }

    /// Product-lattice order: every coordinate of `self` is ≤ the same
    /// coordinate of `other` (missing coordinates count as Neither)
    pub fn leq(&self, other: &Assignment) -> bool {
        self.iter().all(|(name, value)| value.leq(&other.value_of(name)))
    }

    /// Coordinate-wise join
    pub fn join(&self, other: &Assignment) -> Assignment {
        let mut values = self.values.clone();
        for (name, value) in other.iter() {
            values
                .entry(name.to_string())
                .and_modify(|v| *v = TruthValue::join(*v, value))
                .or_insert(value);
        }
        Self { values }
    }

    /// Names whose value differs from `previous`, in name order
    pub fn changed_since<'a>(&'a self, previous: &Assignment) -> Vec<&'a str> {
        self.iter()
            .filter(|(name, value)| previous.get(name) != Some(*value))
            .map(|(name, _)| name)
            .collect()
    }
}

impl Valuation for Assignment {
    fn value_of(&self, name: &str) -> TruthValue {
        self.get(name).unwrap_or(TruthValue::Neither)
    }
}

impl<S: Into<String>> FromIterator<(S, TruthValue)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (S, TruthValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

impl IntoIterator for Assignment {
    type Item = (String, TruthValue);
    type IntoIter = btree_map::IntoIter<String, TruthValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl From<BTreeMap<String, TruthValue>> for Assignment {
    fn from(values: BTreeMap<String, TruthValue>) -> Self {
        Self { values }
    }
}

/// Closed-world view of an assignment
///
/// A sentence that is still Neither reads as False: absence of evidence is
/// taken as evidence against, the same reading the confidence projection uses.
/// Every other value reads through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct ClosedWorld<'a>(pub &'a Assignment);

impl Valuation for ClosedWorld<'_> {
    fn value_of(&self, name: &str) -> TruthValue {
        match self.0.value_of(name) {
            TruthValue::Neither => TruthValue::False,
            value => value,
        }
    }
}
