//! Error types for simulation setup and dispatch.
//!
//! Every failure surfaced by this crate falls into one of three kinds:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | [`ErrorKind::Configuration`] | Inconsistent options, shapes, bounds or breakpoints |
//! | [`ErrorKind::Domain`] | Physically invalid input (superluminal velocity, failed inversion) |
//! | [`ErrorKind::Engine`] | Anything reported by the integration engine, passed through untouched |
//!
//! All errors are fail-fast. Nothing here falls back to a default value.

use thiserror::Error;

use crate::engine::EngineError;

/// Coarse classification of a [`SetupError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested configuration cannot be run.
    Configuration,
    /// The input is physically meaningless.
    Domain,
    /// The integration engine failed.
    Engine,
}

/// Errors raised while preparing or dispatching a simulation.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Left and right states of a discontinuity have different arity.
    #[error("left and right states must have the same number of variables (left: {left}, right: {right})")]
    ArityMismatch { left: usize, right: usize },

    /// A primitive state tuple with an arity other than 3 (1D) or 4 (2D).
    #[error("unsupported primitive state arity {0}: expected 3 (1D) or 4 (2D) variables")]
    UnsupportedArity(usize),

    /// Logarithmic spacing requested on an interval that touches or crosses zero.
    #[error("logarithmic spacing requires strictly positive bounds, got [{min}, {max}]")]
    NonPositiveLogBounds { min: f64, max: f64 },

    /// Breakpoint of a discontinuity lies outside the open domain interval.
    #[error("breakpoint {breakpoint} must lie strictly inside ({min}, {max})")]
    BreakpointOutsideDomain { breakpoint: f64, min: f64, max: f64 },

    /// Two arrays that must agree in shape do not.
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: String,
        actual: String,
    },

    /// The dimensionality of the state disagrees with the geometry or the field.
    #[error("dimensionality mismatch: {0}")]
    DimensionalityMismatch(String),

    /// A scalar parameter is out of range.
    #[error("invalid value for '{name}': {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Velocity magnitude at or above the speed of light.
    #[error("velocity magnitude {speed} >= 1 gives an undefined Lorentz factor{}", cell_suffix(.cell))]
    Superluminal { cell: Option<usize>, speed: f64 },

    /// Conserved-to-primitive inversion failed.
    #[error("primitive recovery failed{}: {reason}", cell_suffix(.cell))]
    PrimitiveRecovery { cell: Option<usize>, reason: String },

    /// Error reported by the integration engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn cell_suffix(cell: &Option<usize>) -> String {
    match cell {
        Some(index) => format!(" at cell {}", index),
        None => String::new(),
    }
}

impl SetupError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Superluminal { .. } | Self::PrimitiveRecovery { .. } => ErrorKind::Domain,
            Self::Engine(_) => ErrorKind::Engine,
            _ => ErrorKind::Configuration,
        }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(
        what: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach a cell index to a domain error raised by a per-state formula.
    pub(crate) fn at_cell(self, index: usize) -> Self {
        match self {
            Self::Superluminal { speed, .. } => Self::Superluminal {
                cell: Some(index),
                speed,
            },
            Self::PrimitiveRecovery { reason, .. } => Self::PrimitiveRecovery {
                cell: Some(index),
                reason,
            },
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            SetupError::ArityMismatch { left: 3, right: 4 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            SetupError::Superluminal {
                cell: None,
                speed: 1.2
            }
            .kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            SetupError::from(EngineError::NonConvergence("stalled".into())).kind(),
            ErrorKind::Engine
        );
    }

    #[test]
    fn test_at_cell_attaches_index() {
        let err = SetupError::Superluminal {
            cell: None,
            speed: 1.0,
        }
        .at_cell(7);
        assert!(err.to_string().contains("cell 7"));
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err = SetupError::from(EngineError::NonFinite { cell: 3 });
        assert_eq!(err.to_string(), EngineError::NonFinite { cell: 3 }.to_string());
    }
}
