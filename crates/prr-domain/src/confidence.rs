//! Confidence interval module

/// Closed confidence interval [lower, upper] within [0, 1]
///
/// The width captures how much the value is contested: a point interval is
/// settled, the full unit interval means the evidence pulls both ways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound [0.0, 1.0]
    pub lower: f64,
    /// Upper bound [0.0, 1.0]
    pub upper: f64,
}

impl ConfidenceInterval {
    /// The settled-true interval [1, 1]
    pub const CERTAIN: Self = Self { lower: 1.0, upper: 1.0 };

    /// The settled-false interval [0, 0]
    pub const IMPOSSIBLE: Self = Self { lower: 0.0, upper: 0.0 };

    /// The fully contested interval [0, 1]
    pub const UNIT: Self = Self { lower: 0.0, upper: 1.0 };

    /// Create a new confidence interval
    ///
    /// # Panics
    /// Panics if bounds are invalid (lower > upper or out of [0, 1])
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!((0.0..=1.0).contains(&lower), "Lower bound must be in [0, 1]");
        assert!((0.0..=1.0).contains(&upper), "Upper bound must be in [0, 1]");
        assert!(lower <= upper, "Lower bound must be <= upper bound");

        Self { lower, upper }
    }

    /// Get the midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Get the width of the interval (uncertainty measure)
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if the interval contains a value
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Smallest interval covering both `self` and `other`
    pub fn hull(&self, other: &ConfidenceInterval) -> ConfidenceInterval {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// The interval as a `[lower, upper]` pair
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }
}
