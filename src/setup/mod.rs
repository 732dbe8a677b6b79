//! Initial conditions.
//!
//! A run starts either from a full primitive field or from a two-state
//! discontinuity. Both end up as a [`ConservedState`].

mod riemann;

pub use riemann::{DiscontinuitySetup, RiemannProblem, DISCONTINUITY_MARGIN};

use crate::equations::IdealGas;
use crate::error::Result;
use crate::mesh::Geometry;
use crate::state::{ConservedState, ConservedStateBuilder, PrimitiveState};
use crate::types::{Dimensionality, GridShape, Regime};

/// Initial data for a fresh run.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialState {
    /// Left/right constant states split at a breakpoint
    Discontinuity(RiemannProblem),
    /// Arbitrary primitive field
    Field(PrimitiveState),
}

impl InitialState {
    /// Two-state initial data.
    pub fn riemann(left: Vec<f64>, right: Vec<f64>, breakpoint: f64) -> Self {
        Self::Discontinuity(RiemannProblem::new(left, right, breakpoint))
    }

    /// Dimensionality implied by the state arity.
    pub fn dimensionality(&self) -> Result<Dimensionality> {
        match self {
            Self::Discontinuity(problem) => problem.dimensionality(),
            Self::Field(state) => Ok(state.dimensionality()),
        }
    }

    /// Convert to conserved variables.
    ///
    /// `point_counts` sizes a discontinuity; a primitive field brings its own shape.
    pub fn build(
        &self,
        gas: IdealGas,
        regime: Regime,
        geometry: &Geometry,
        point_counts: GridShape,
    ) -> Result<ConservedState> {
        match self {
            Self::Discontinuity(problem) => {
                DiscontinuitySetup::new(gas, regime).build_riemann(problem, geometry, point_counts)
            }
            Self::Field(state) => ConservedStateBuilder::new(gas, regime).build(state),
        }
    }
}

impl From<RiemannProblem> for InitialState {
    fn from(problem: RiemannProblem) -> Self {
        Self::Discontinuity(problem)
    }
}

impl From<PrimitiveState> for InitialState {
    fn from(state: PrimitiveState) -> Self {
        Self::Field(state)
    }
}
