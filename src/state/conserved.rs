//! Conserved-variable and Lorentz-factor fields.

use serde::{Deserialize, Serialize};

use super::{map_cells, PrimitiveState};
use crate::boundary::GhostLayout;
use crate::equations::{ConservedCell, ConservedVariables, HydroSystem, IdealGas};
use crate::error::{Result, SetupError};
use crate::types::{Dimensionality, GridShape, Regime};

/// Conserved variables over a structured grid, possibly including ghost cells.
///
/// Storage is a flat vector with the variable axis outermost:
/// `data[var * n_cells + j * nx + i]`, which matches an array of shape
/// `(n_vars, ny, nx)` (or `(n_vars, n)` in 1D).
///
/// | Regime       | 1D variables     | 2D variables            |
/// |--------------|------------------|-------------------------|
/// | Classical    | ρ, ρv, E         | ρ, ρv₁, ρv₂, E          |
/// | Relativistic | D, S, τ          | D, S₁, S₂, τ            |
///
/// `shape` always describes the full array; `ghosts` records how many of
/// those cells on each side are boundary ghosts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConservedField {
    regime: Regime,
    shape: GridShape,
    #[serde(default)]
    ghosts: GhostLayout,
    data: Vec<f64>,
}

impl ConservedField {
    /// A zero-filled field without ghost cells.
    pub fn zeros(regime: Regime, shape: GridShape) -> Self {
        let n_vars = shape.dimensionality().n_vars();
        Self {
            regime,
            shape,
            ghosts: GhostLayout::none(),
            data: vec![0.0; n_vars * shape.n_cells()],
        }
    }

    /// Wrap existing storage, checking its length against the shape.
    pub fn from_raw(
        regime: Regime,
        shape: GridShape,
        ghosts: GhostLayout,
        data: Vec<f64>,
    ) -> Result<Self> {
        let field = Self {
            regime,
            shape,
            ghosts,
            data,
        };
        field.validate()?;
        Ok(field)
    }

    pub(crate) fn from_parts(
        regime: Regime,
        shape: GridShape,
        ghosts: GhostLayout,
        data: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(data.len(), shape.dimensionality().n_vars() * shape.n_cells());
        Self {
            regime,
            shape,
            ghosts,
            data,
        }
    }

    /// Check storage length and ghost layout against the shape.
    pub fn validate(&self) -> Result<()> {
        let expected = self.n_vars() * self.shape.n_cells();
        if self.data.len() != expected {
            return Err(SetupError::shape_mismatch(
                "conserved field storage",
                format!("{} values ({} vars × {})", expected, self.n_vars(), self.shape),
                self.data.len(),
            ));
        }
        self.ghosts.check_fits(self.shape)
    }

    #[inline]
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Full shape, ghost cells included.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn ghosts(&self) -> GhostLayout {
        self.ghosts
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        self.shape.dimensionality()
    }

    /// Number of conserved variables per cell (3 in 1D, 4 in 2D).
    #[inline]
    pub fn n_vars(&self) -> usize {
        self.dimensionality().n_vars()
    }

    /// Number of cells, ghost cells included.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.shape.n_cells()
    }

    /// Shape of the physical domain without ghost cells.
    pub fn interior_shape(&self) -> GridShape {
        self.ghosts.interior_of(self.shape).unwrap_or(self.shape)
    }

    /// Names of the variables in storage order.
    pub fn variable_names(&self) -> &'static [&'static str] {
        match (self.regime, self.dimensionality()) {
            (Regime::Classical, Dimensionality::One) => &["mass", "momentum", "energy"],
            (Regime::Classical, Dimensionality::Two) => {
                &["mass", "momentum_1", "momentum_2", "energy"]
            }
            (Regime::Relativistic, Dimensionality::One) => &["D", "S", "tau"],
            (Regime::Relativistic, Dimensionality::Two) => &["D", "S1", "S2", "tau"],
        }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// All cells of one variable.
    pub fn variable(&self, var: usize) -> &[f64] {
        let n = self.n_cells();
        &self.data[var * n..(var + 1) * n]
    }

    /// Mutable view of one variable.
    pub fn variable_mut(&mut self, var: usize) -> &mut [f64] {
        let n = self.n_cells();
        &mut self.data[var * n..(var + 1) * n]
    }

    /// Conserved state of the cell at flat index `index`.
    pub fn cell(&self, index: usize) -> ConservedCell {
        let n = self.n_cells();
        let d = &self.data;
        match self.dimensionality() {
            Dimensionality::One => ConservedCell {
                mass: d[index],
                momentum_1: d[n + index],
                momentum_2: 0.0,
                energy: d[2 * n + index],
            },
            Dimensionality::Two => ConservedCell {
                mass: d[index],
                momentum_1: d[n + index],
                momentum_2: d[2 * n + index],
                energy: d[3 * n + index],
            },
        }
    }

    /// Conserved state of cell `(i, j)`.
    pub fn cell_at(&self, i: usize, j: usize) -> ConservedCell {
        self.cell(self.shape.index(i, j))
    }

    /// Overwrite the cell at flat index `index`.
    pub fn set_cell(&mut self, index: usize, cell: &ConservedCell) {
        let n = self.n_cells();
        for (var, value) in cell.components(self.dimensionality()).into_iter().enumerate() {
            self.data[var * n + index] = value;
        }
    }

    /// Recover primitives for every cell, ghost cells included.
    ///
    /// For relativistic fields, `lorentz` seeds the pressure iteration.
    pub fn to_primitive(
        &self,
        gas: IdealGas,
        lorentz: Option<&LorentzFactorField>,
    ) -> Result<PrimitiveState> {
        if let Some(w) = lorentz {
            check_companion(self, w)?;
        }
        let system = HydroSystem::new(self.regime, gas);
        let cells = map_cells(self.n_cells(), |c| {
            let hint = lorentz.map(|w| w.data[c]);
            system
                .to_primitive(&self.cell(c), hint)
                .map_err(|e| e.at_cell(c))
        })?;
        Ok(PrimitiveState::from_cells(self.shape, &cells))
    }

    /// Re-label ghost cells without touching storage.
    pub(crate) fn set_ghosts(&mut self, ghosts: GhostLayout) -> Result<()> {
        ghosts.check_fits(self.shape)?;
        self.ghosts = ghosts;
        Ok(())
    }

    pub(crate) fn replace_storage(
        &mut self,
        shape: GridShape,
        ghosts: GhostLayout,
        data: Vec<f64>,
    ) {
        debug_assert_eq!(data.len(), self.n_vars() * shape.n_cells());
        self.shape = shape;
        self.ghosts = ghosts;
        self.data = data;
    }
}

/// Lorentz factor W = 1/sqrt(1 - |v|²), one value per cell.
///
/// Shares shape and ghost layout with the relativistic [`ConservedField`] it
/// accompanies. The two only change shape together, through
/// [`GhostZoneManager`](crate::boundary::GhostZoneManager).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LorentzFactorField {
    shape: GridShape,
    #[serde(default)]
    ghosts: GhostLayout,
    data: Vec<f64>,
}

impl LorentzFactorField {
    /// Wrap per-cell Lorentz factors for a field without ghost cells.
    pub fn from_values(shape: GridShape, data: Vec<f64>) -> Result<Self> {
        Self::from_raw(shape, GhostLayout::none(), data)
    }

    /// Wrap existing storage, checking its length against the shape.
    pub fn from_raw(shape: GridShape, ghosts: GhostLayout, data: Vec<f64>) -> Result<Self> {
        let field = Self {
            shape,
            ghosts,
            data,
        };
        field.validate()?;
        Ok(field)
    }

    pub(crate) fn from_parts(shape: GridShape, ghosts: GhostLayout, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), shape.n_cells());
        Self {
            shape,
            ghosts,
            data,
        }
    }

    /// Check storage length, ghost layout and W >= 1.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() != self.shape.n_cells() {
            return Err(SetupError::shape_mismatch(
                "lorentz factor storage",
                self.shape.n_cells(),
                self.data.len(),
            ));
        }
        if let Some(cell) = self.data.iter().position(|w| !(*w >= 1.0)) {
            return Err(SetupError::invalid(
                "lorentz_factor",
                self.data[cell],
                format!("Lorentz factor must be >= 1 (cell {})", cell),
            ));
        }
        self.ghosts.check_fits(self.shape)
    }

    /// Derive W from a relativistic conserved field by primitive recovery.
    pub fn from_conserved(field: &ConservedField, gas: IdealGas) -> Result<Self> {
        if field.regime() != Regime::Relativistic {
            return Err(SetupError::invalid(
                "regime",
                field.regime(),
                "Lorentz factors exist only for relativistic fields",
            ));
        }
        let primitive = field.to_primitive(gas, None)?;
        let data = (0..field.n_cells())
            .map(|c| {
                let prim = primitive.cell(c);
                1.0 / (1.0 - prim.speed_squared()).sqrt()
            })
            .collect();
        Ok(Self {
            shape: field.shape(),
            ghosts: field.ghosts(),
            data,
        })
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn ghosts(&self) -> GhostLayout {
        self.ghosts
    }

    /// Shape of the physical domain without ghost cells.
    pub fn interior_shape(&self) -> GridShape {
        self.ghosts.interior_of(self.shape).unwrap_or(self.shape)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// W of the cell at flat index `index`.
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.data[index]
    }

    pub(crate) fn replace_storage(
        &mut self,
        shape: GridShape,
        ghosts: GhostLayout,
        data: Vec<f64>,
    ) {
        debug_assert_eq!(data.len(), shape.n_cells());
        self.shape = shape;
        self.ghosts = ghosts;
        self.data = data;
    }
}

/// A Lorentz field must describe exactly the cells of its conserved field.
pub(crate) fn check_companion(
    conserved: &ConservedField,
    lorentz: &LorentzFactorField,
) -> Result<()> {
    if conserved.shape() != lorentz.shape() || conserved.ghosts() != lorentz.ghosts() {
        return Err(SetupError::shape_mismatch(
            "lorentz factor field",
            format!("{} with ghosts {}", conserved.shape(), conserved.ghosts()),
            format!("{} with ghosts {}", lorentz.shape(), lorentz.ghosts()),
        ));
    }
    Ok(())
}
