//! Two-state (Riemann problem) initial data.

use tracing::debug;

use crate::boundary::GhostLayout;
use crate::equations::{IdealGas, PrimitiveCell};
use crate::error::{Result, SetupError};
use crate::mesh::Geometry;
use crate::state::{ConservedState, ConservedStateBuilder};
use crate::types::{Dimensionality, GridShape, Interval, Regime};

/// Margin cells allocated on each side of a discontinuity field.
///
/// They are recorded as ghosts, so later padding only adds what is missing.
pub const DISCONTINUITY_MARGIN: usize = 1;

/// Left and right constant states separated at `breakpoint` along x1.
#[derive(Clone, Debug, PartialEq)]
pub struct RiemannProblem {
    /// (ρ, p, v) or (ρ, p, v₁, v₂) left of the breakpoint
    pub left: Vec<f64>,
    /// Same arity as `left`, at and right of the breakpoint
    pub right: Vec<f64>,
    /// x1 coordinate of the discontinuity, strictly inside the domain
    pub breakpoint: f64,
}

impl RiemannProblem {
    pub fn new(left: Vec<f64>, right: Vec<f64>, breakpoint: f64) -> Self {
        Self {
            left,
            right,
            breakpoint,
        }
    }

    /// Classical Sod shock tube on [0, 1].
    pub fn sod() -> Self {
        Self::new(vec![1.0, 1.0, 0.0], vec![0.125, 0.1, 0.0], 0.5)
    }

    /// Dimensionality implied by the state arity.
    ///
    /// Fails if the two states differ in arity or the arity is not 3 or 4.
    pub fn dimensionality(&self) -> Result<Dimensionality> {
        if self.left.len() != self.right.len() {
            return Err(SetupError::ArityMismatch {
                left: self.left.len(),
                right: self.right.len(),
            });
        }
        Dimensionality::from_arity(self.left.len())
    }

    /// Index of the first cell that takes the right state, in an array of
    /// `n_total` cells spanning `bounds`.
    ///
    /// Computed as `round(n_total * (breakpoint - min) / (max - min))`. On a
    /// domain starting at zero this is `round(n_total / (length / breakpoint))`;
    /// on offset domains the breakpoint is measured from `min` so the split
    /// stays at its physical position.
    pub fn split_index(&self, bounds: Interval, n_total: usize) -> Result<usize> {
        if !bounds.strictly_contains(self.breakpoint) {
            return Err(SetupError::BreakpointOutsideDomain {
                breakpoint: self.breakpoint,
                min: bounds.min,
                max: bounds.max,
            });
        }
        let fraction = (self.breakpoint - bounds.min) / bounds.length();
        Ok((n_total as f64 * fraction).round() as usize)
    }
}

/// Builds conserved fields for two-state initial data.
///
/// # Example
///
/// ```
/// use rhd_rs::equations::IdealGas;
/// use rhd_rs::mesh::Geometry;
/// use rhd_rs::setup::{DiscontinuitySetup, RiemannProblem};
/// use rhd_rs::types::{GridShape, Interval, Regime};
///
/// let setup = DiscontinuitySetup::new(IdealGas::new(1.4).unwrap(), Regime::Classical);
/// let state = setup
///     .build_riemann(
///         &RiemannProblem::sod(),
///         &Geometry::one_d(Interval::unit()),
///         GridShape::one_d(100).unwrap(),
///     )
///     .unwrap();
///
/// // 100 cells plus one margin cell per side
/// assert_eq!(state.conserved.shape().nx(), 102);
/// assert_eq!(state.conserved.interior_shape().nx(), 100);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DiscontinuitySetup {
    builder: ConservedStateBuilder,
}

impl DiscontinuitySetup {
    pub fn new(gas: IdealGas, regime: Regime) -> Self {
        Self {
            builder: ConservedStateBuilder::new(gas, regime),
        }
    }

    /// Fill a field with the left state before the breakpoint index and the
    /// right state from it onward.
    ///
    /// The field has `point_counts` interior cells plus a
    /// [`DISCONTINUITY_MARGIN`] on each side of every axis. In 2D the split
    /// runs along x1 and every row is identical.
    pub fn build_riemann(
        &self,
        problem: &RiemannProblem,
        geometry: &Geometry,
        point_counts: GridShape,
    ) -> Result<ConservedState> {
        let dims = problem.dimensionality()?;
        if dims != point_counts.dimensionality() || dims != geometry.dimensionality() {
            return Err(SetupError::DimensionalityMismatch(format!(
                "{}-component states describe a {} problem, but point counts are {} and geometry is {}",
                problem.left.len(),
                dims,
                point_counts.dimensionality(),
                geometry.dimensionality()
            )));
        }

        let margin = GhostLayout::uniform(DISCONTINUITY_MARGIN, dims);
        let shape = point_counts.grown(margin.x1, margin.x2);
        let split = problem.split_index(geometry.x1(), shape.nx())?;

        let left = self.builder.convert_cell(&PrimitiveCell::from_slice(&problem.left)?)?;
        let right = self.builder.convert_cell(&PrimitiveCell::from_slice(&problem.right)?)?;

        debug!(
            breakpoint = problem.breakpoint,
            split,
            shape = %shape,
            "building discontinuity"
        );

        let nx = shape.nx();
        let cells: Vec<_> = (0..shape.n_cells())
            .map(|c| if c % nx < split { left } else { right })
            .collect();

        Ok(self.builder.assemble(shape, margin, &cells))
    }
}
