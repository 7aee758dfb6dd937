//! PRR Domain Layer
//!
//! This crate contains the algebra behind the PRR engine: the four-valued
//! paraconsistent logic B4, its information lattice, formulas over named
//! sentences, immutable assignments, and the projection of truth values onto
//! confidence intervals. It has ZERO external dependencies.
//!
//! ## Key Concepts
//!
//! - **TruthValue**: one of True, False, Both (glut), Neither (gap)
//! - **Operators**: negation, conjunction and disjunction tables of B4
//! - **Information lattice**: Neither ≤ {True, False} ≤ Both, ordered by how
//!   much is known rather than by truth
//! - **Formula**: expression tree that may reference other sentences by name
//! - **Assignment**: frozen snapshot of every sentence's value in one round
//! - **Confidence Interval**: the [lower, upper] projection of a stable value
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure functions and immutable values only
//! - Graph construction and the solver live in `prr-engine`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assignment;
pub mod confidence;
pub mod formula;
pub mod lattice;
pub mod operators;
pub mod projection;
pub mod truth;

// Re-exports for convenience
pub use assignment::{Assignment, ClosedWorld, Valuation};
pub use confidence::ConfidenceInterval;
pub use formula::Formula;
pub use lattice::{BoundedLattice, Lattice, LATTICE_HEIGHT};
pub use operators::{
    conjunction, disjunction, monotonicity_violations, negate, Belnap, MonotonicityViolation,
    Operators,
};
pub use projection::{project, ConfidenceProjector, Projection};
pub use truth::TruthValue;
