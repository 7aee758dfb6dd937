//! Information lattice over truth values
//!
//! The order is "how much is known", not "how true":
//!
//! ```text
//!          Both
//!         /    \
//!      True    False
//!         \    /
//!         Neither
//! ```

use crate::TruthValue;
use std::cmp::Ordering;

/// Height of the information lattice (longest strictly increasing chain minus one)
///
/// Bounds how often a single sentence can change value during solving.
pub const LATTICE_HEIGHT: usize = 2;

/// Join-semilattice with a dual meet
pub trait Lattice: Sized + PartialEq {
    /// Least upper bound
    fn join(&self, other: &Self) -> Self;

    /// Greatest lower bound
    fn meet(&self, other: &Self) -> Self;

    /// Lattice order: `self ≤ other` iff joining adds nothing to `other`
    fn leq(&self, other: &Self) -> bool {
        self.join(other) == *other
    }
}

/// Lattice with a bottom and a top element
pub trait BoundedLattice: Lattice {
    /// Least element
    fn bottom() -> Self;

    /// Greatest element
    fn top() -> Self;
}

/// Join pools the evidence of both values, meet keeps what they share
impl Lattice for TruthValue {
    fn join(&self, other: &Self) -> Self {
        TruthValue::from_evidence(
            self.is_told_true() || other.is_told_true(),
            self.is_told_false() || other.is_told_false(),
        )
    }

    fn meet(&self, other: &Self) -> Self {
        TruthValue::from_evidence(
            self.is_told_true() && other.is_told_true(),
            self.is_told_false() && other.is_told_false(),
        )
    }
}

impl BoundedLattice for TruthValue {
    fn bottom() -> Self {
        TruthValue::Neither
    }

    fn top() -> Self {
        TruthValue::Both
    }
}

impl PartialOrd for TruthValue {
    /// Information order; True and False are incomparable
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.leq(other) {
            Some(Ordering::Less)
        } else if other.leq(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl TruthValue {
    /// Join of two values (free-standing form of [`Lattice::join`])
    pub fn join(self, other: TruthValue) -> TruthValue {
        Lattice::join(&self, &other)
    }

    /// Meet of two values (free-standing form of [`Lattice::meet`])
    pub fn meet(self, other: TruthValue) -> TruthValue {
        Lattice::meet(&self, &other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TruthValue::{Both, False, Neither, True};

    #[test]
    fn test_join_table() {
        assert_eq!(True.join(False), Both);
        assert_eq!(False.join(True), Both);
        assert_eq!(Neither.join(True), True);
        assert_eq!(False.join(Neither), False);
        assert_eq!(Both.join(Neither), Both);
        assert_eq!(True.join(True), True);
    }

    #[test]
    fn test_meet_is_dual() {
        assert_eq!(True.meet(False), Neither);
        assert_eq!(Both.meet(True), True);
        assert_eq!(Neither.meet(Both), Neither);
        assert_eq!(False.meet(False), False);
    }

    #[test]
    fn test_order() {
        assert!(Neither < True);
        assert!(Neither < False);
        assert!(True < Both);
        assert!(False < Both);
        assert!(Neither < Both);
        assert_eq!(True.partial_cmp(&False), None);
        assert!(!(True <= False) && !(False <= True));
    }

    #[test]
    fn test_bounds() {
        for v in TruthValue::ALL {
            assert!(TruthValue::bottom().leq(&v));
            assert!(v.leq(&TruthValue::top()));
        }
    }

    #[test]
    fn test_longest_chain_matches_height() {
        // Neither < True < Both is a longest strictly increasing chain
        let chain = [Neither, True, Both];
        assert!(chain.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(chain.len() - 1, LATTICE_HEIGHT);
        assert_eq!(Neither.join(True).join(False), TruthValue::top());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn truth_value() -> impl Strategy<Value = TruthValue> {
        prop::sample::select(TruthValue::ALL.to_vec())
    }

    proptest! {
        /// Property: join is commutative
        #[test]
        fn test_join_commutative(a in truth_value(), b in truth_value()) {
            prop_assert_eq!(a.join(b), b.join(a));
        }

        /// Property: join is associative
        #[test]
        fn test_join_associative(a in truth_value(), b in truth_value(), c in truth_value()) {
            prop_assert_eq!(a.join(b).join(c), a.join(b.join(c)));
        }

        /// Property: join is idempotent, Neither is its identity and Both absorbs
        #[test]
        fn test_join_identity_and_absorption(v in truth_value()) {
            prop_assert_eq!(v.join(v), v);
            prop_assert_eq!(TruthValue::Neither.join(v), v);
            prop_assert_eq!(v.join(TruthValue::Both), TruthValue::Both);
        }

        /// Property: join is an upper bound of both arguments
        #[test]
        fn test_join_is_upper_bound(a in truth_value(), b in truth_value()) {
            let j = a.join(b);
            prop_assert!(a.leq(&j) && b.leq(&j));
        }

        /// Property: meet and join absorb each other
        #[test]
        fn test_absorption_laws(a in truth_value(), b in truth_value()) {
            prop_assert_eq!(a.join(a.meet(b)), a);
            prop_assert_eq!(a.meet(a.join(b)), a);
        }
    }
}
