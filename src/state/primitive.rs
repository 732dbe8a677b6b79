//! Primitive-variable fields.

use crate::equations::PrimitiveCell;
use crate::error::{Result, SetupError};
use crate::types::{Dimensionality, GridShape};

/// Raw physical fields (ρ, p, v₁[, v₂]) over a structured grid.
///
/// All component arrays share one [`GridShape`]. 2D arrays are row-major
/// with x2 as the slow axis. Physical validity (ρ > 0, p > 0) is a
/// precondition and is not checked here.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveState {
    shape: GridShape,
    density: Vec<f64>,
    pressure: Vec<f64>,
    velocity_1: Vec<f64>,
    velocity_2: Option<Vec<f64>>,
}

impl PrimitiveState {
    /// Create a 1D state from equal-length arrays.
    pub fn one_d(density: Vec<f64>, pressure: Vec<f64>, velocity: Vec<f64>) -> Result<Self> {
        let shape = GridShape::one_d(density.len())?;
        Self::from_components(shape, vec![density, pressure, velocity])
    }

    /// Create a 2D state with `nx × ny` cells.
    pub fn two_d(
        shape: GridShape,
        density: Vec<f64>,
        pressure: Vec<f64>,
        velocity_1: Vec<f64>,
        velocity_2: Vec<f64>,
    ) -> Result<Self> {
        Self::from_components(shape, vec![density, pressure, velocity_1, velocity_2])
    }

    /// Create a state from a (ρ, p, v) or (ρ, p, v₁, v₂) tuple of arrays.
    ///
    /// The tuple arity decides the dimensionality, which must agree with `shape`.
    pub fn from_components(shape: GridShape, components: Vec<Vec<f64>>) -> Result<Self> {
        let dims = Dimensionality::from_arity(components.len())?;
        if dims != shape.dimensionality() {
            return Err(SetupError::DimensionalityMismatch(format!(
                "{} primitive components describe a {} state but the grid is {}",
                components.len(),
                dims,
                shape.dimensionality()
            )));
        }

        const NAMES: [&str; 4] = ["density", "pressure", "velocity_1", "velocity_2"];
        for (name, values) in NAMES.iter().zip(&components) {
            if values.len() != shape.n_cells() {
                return Err(SetupError::shape_mismatch(*name, shape, values.len()));
            }
        }

        let mut it = components.into_iter();
        let (Some(density), Some(pressure), Some(velocity_1)) = (it.next(), it.next(), it.next())
        else {
            return Err(SetupError::UnsupportedArity(0));
        };
        let velocity_2 = it.next();

        Ok(Self {
            shape,
            density,
            pressure,
            velocity_1,
            velocity_2,
        })
    }

    /// Fill every cell of `shape` with the same primitive state.
    pub fn uniform(shape: GridShape, cell: PrimitiveCell) -> Self {
        let n = shape.n_cells();
        let velocity_2 = match shape.dimensionality() {
            Dimensionality::One => None,
            Dimensionality::Two => Some(vec![cell.v2; n]),
        };
        Self {
            shape,
            density: vec![cell.rho; n],
            pressure: vec![cell.p; n],
            velocity_1: vec![cell.v1; n],
            velocity_2,
        }
    }

    /// Assemble a state from per-cell primitives, in flat index order.
    pub(crate) fn from_cells(shape: GridShape, cells: &[PrimitiveCell]) -> Self {
        debug_assert_eq!(cells.len(), shape.n_cells());
        let velocity_2 = match shape.dimensionality() {
            Dimensionality::One => None,
            Dimensionality::Two => Some(cells.iter().map(|c| c.v2).collect()),
        };
        Self {
            shape,
            density: cells.iter().map(|c| c.rho).collect(),
            pressure: cells.iter().map(|c| c.p).collect(),
            velocity_1: cells.iter().map(|c| c.v1).collect(),
            velocity_2,
        }
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        self.shape.dimensionality()
    }

    /// Number of primitive components (3 in 1D, 4 in 2D).
    #[inline]
    pub fn arity(&self) -> usize {
        self.dimensionality().n_vars()
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.shape.n_cells()
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    pub fn velocity_1(&self) -> &[f64] {
        &self.velocity_1
    }

    /// Second velocity component, present only in 2D.
    pub fn velocity_2(&self) -> Option<&[f64]> {
        self.velocity_2.as_deref()
    }

    /// Primitives of the cell at flat index `index`.
    #[inline]
    pub fn cell(&self, index: usize) -> PrimitiveCell {
        PrimitiveCell {
            rho: self.density[index],
            p: self.pressure[index],
            v1: self.velocity_1[index],
            v2: self.velocity_2.as_ref().map_or(0.0, |v| v[index]),
        }
    }
}
