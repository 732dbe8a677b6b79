//! 1D domain bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};

/// A closed coordinate interval `[min, max]` along one axis.
///
/// # Example
///
/// ```
/// use rhd_rs::types::Interval;
///
/// let domain = Interval::new(0.0, 1.0).unwrap();
/// assert_eq!(domain.length(), 1.0);
/// assert!(domain.strictly_contains(0.5));
/// assert!(!domain.strictly_contains(1.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Interval {
    /// Create new bounds.
    ///
    /// Fails if either bound is not finite or `max <= min`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SetupError::invalid(
                "bounds",
                format!("[{}, {}]", min, max),
                "bounds must be finite",
            ));
        }
        if max <= min {
            return Err(SetupError::invalid(
                "bounds",
                format!("[{}, {}]", min, max),
                "upper bound must be greater than lower bound",
            ));
        }
        Ok(Self { min, max })
    }

    /// The unit interval [0, 1].
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Interval length (max - min).
    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the interval.
    #[inline]
    pub fn center(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    /// Check if a point is inside the interval (inclusive).
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Check if a point lies in the open interval (min, max).
    #[inline]
    pub fn strictly_contains(&self, x: f64) -> bool {
        x > self.min && x < self.max
    }

    /// Whether both bounds are strictly positive (required for log spacing).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.min > 0.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::unit()
    }
}
