//! Solver variant selection.

use std::fmt;

use super::{EngineError, EngineInput, IntegrationEngine};
use crate::state::ConservedField;
use crate::types::{Dimensionality, Regime};

/// One of the four engine entry points, keyed by dimensionality and regime.
///
/// Every other option (order, Riemann scheme, CFL number, coordinates,
/// sources) travels unchanged in [`EngineInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverVariant {
    Classical1D,
    Relativistic1D,
    Classical2D,
    Relativistic2D,
}

impl SolverVariant {
    /// Every variant, in dispatch-table order.
    pub const ALL: [SolverVariant; 4] = [
        Self::Classical1D,
        Self::Relativistic1D,
        Self::Classical2D,
        Self::Relativistic2D,
    ];

    /// Look up the variant for a `(dimensionality, regime)` pair.
    pub fn select(dims: Dimensionality, regime: Regime) -> Self {
        match (dims, regime) {
            (Dimensionality::One, Regime::Classical) => Self::Classical1D,
            (Dimensionality::One, Regime::Relativistic) => Self::Relativistic1D,
            (Dimensionality::Two, Regime::Classical) => Self::Classical2D,
            (Dimensionality::Two, Regime::Relativistic) => Self::Relativistic2D,
        }
    }

    pub fn dimensionality(self) -> Dimensionality {
        match self {
            Self::Classical1D | Self::Relativistic1D => Dimensionality::One,
            Self::Classical2D | Self::Relativistic2D => Dimensionality::Two,
        }
    }

    pub fn regime(self) -> Regime {
        match self {
            Self::Classical1D | Self::Classical2D => Regime::Classical,
            Self::Relativistic1D | Self::Relativistic2D => Regime::Relativistic,
        }
    }

    /// Call the matching entry point of `engine`.
    pub fn invoke<E: IntegrationEngine + ?Sized>(
        self,
        engine: &mut E,
        input: &EngineInput<'_>,
    ) -> Result<ConservedField, EngineError> {
        match self {
            Self::Classical1D => engine.classical_1d(input),
            Self::Relativistic1D => engine.relativistic_1d(input),
            Self::Classical2D => engine.classical_2d(input),
            Self::Relativistic2D => engine.relativistic_2d(input),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Classical1D => "classical_1d",
            Self::Relativistic1D => "relativistic_1d",
            Self::Classical2D => "classical_2d",
            Self::Relativistic2D => "relativistic_2d",
        }
    }
}

impl fmt::Display for SolverVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
