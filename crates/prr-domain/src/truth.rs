//! Truth value module - the four values of B4

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A truth value of the four-valued logic B4
///
/// Besides the classical values, B4 admits:
/// - Both: the sentence is supported as true and as false (a glut)
/// - Neither: nothing is known about the sentence yet (a gap)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TruthValue {
    /// Classically true
    True,

    /// Classically false
    False,

    /// Both true and false
    Both,

    /// Neither true nor false
    #[default]
    Neither,
}

impl TruthValue {
    /// Every value, in declaration order
    pub const ALL: [TruthValue; 4] = [
        TruthValue::True,
        TruthValue::False,
        TruthValue::Both,
        TruthValue::Neither,
    ];

    /// Get the value name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TruthValue::True => "true",
            TruthValue::False => "false",
            TruthValue::Both => "both",
            TruthValue::Neither => "neither",
        }
    }

    /// Parse a value from its long or single-letter name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "true" | "t" => Some(TruthValue::True),
            "false" | "f" => Some(TruthValue::False),
            "both" | "b" => Some(TruthValue::Both),
            "neither" | "n" => Some(TruthValue::Neither),
            _ => None,
        }
    }

    /// Whether the value carries any evidence that the sentence is true
    pub fn is_told_true(&self) -> bool {
        matches!(self, TruthValue::True | TruthValue::Both)
    }

    /// Whether the value carries any evidence that the sentence is false
    pub fn is_told_false(&self) -> bool {
        matches!(self, TruthValue::False | TruthValue::Both)
    }

    /// Build a value from its two evidence bits
    pub fn from_evidence(told_true: bool, told_false: bool) -> Self {
        match (told_true, told_false) {
            (true, false) => TruthValue::True,
            (false, true) => TruthValue::False,
            (true, true) => TruthValue::Both,
            (false, false) => TruthValue::Neither,
        }
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TruthValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid truth value: {}", s))
    }
}

impl Not for TruthValue {
    type Output = TruthValue;

    fn not(self) -> Self::Output {
        crate::operators::negate(self)
    }
}

impl BitAnd for TruthValue {
    type Output = TruthValue;

    fn bitand(self, rhs: Self) -> Self::Output {
        crate::operators::conjunction(self, rhs)
    }
}

impl BitOr for TruthValue {
    type Output = TruthValue;

    fn bitor(self, rhs: Self) -> Self::Output {
        crate::operators::disjunction(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_names() {
        assert_eq!(TruthValue::parse("true"), Some(TruthValue::True));
        assert_eq!(TruthValue::parse("F"), Some(TruthValue::False));
        assert_eq!(TruthValue::parse(" Both "), Some(TruthValue::Both));
        assert_eq!(TruthValue::parse("n"), Some(TruthValue::Neither));
        assert_eq!(TruthValue::parse("maybe"), None);
    }

    #[test]
    fn test_display_matches_parse() {
        for v in TruthValue::ALL {
            assert_eq!(v.to_string().parse::<TruthValue>(), Ok(v));
        }
    }

    #[test]
    fn test_evidence_bits() {
        for v in TruthValue::ALL {
            assert_eq!(TruthValue::from_evidence(v.is_told_true(), v.is_told_false()), v);
        }
        assert!(TruthValue::Both.is_told_true() && TruthValue::Both.is_told_false());
        assert!(!TruthValue::Neither.is_told_true() && !TruthValue::Neither.is_told_false());
    }

    #[test]
    fn test_default_is_neither() {
        assert_eq!(TruthValue::default(), TruthValue::Neither);
    }

    #[test]
    fn test_operator_overloads() {
        assert_eq!(!TruthValue::True, TruthValue::False);
        assert_eq!(TruthValue::Both & TruthValue::Neither, TruthValue::False);
        assert_eq!(TruthValue::Both | TruthValue::Neither, TruthValue::True);
    }
}
