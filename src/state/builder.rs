//! Primitive to conserved field conversion.

use super::{map_cells, ConservedField, LorentzFactorField, PrimitiveState};
use crate::boundary::GhostLayout;
use crate::equations::{ConservedCell, ConservedVariables, HydroSystem, IdealGas, PrimitiveCell};
use crate::error::Result;
use crate::types::{GridShape, Regime};

/// A conserved field together with its Lorentz factors (relativistic only).
#[derive(Clone, Debug, PartialEq)]
pub struct ConservedState {
    pub conserved: ConservedField,
    pub lorentz: Option<LorentzFactorField>,
}

impl ConservedState {
    #[inline]
    pub fn regime(&self) -> Regime {
        self.conserved.regime()
    }
}

/// Converts primitive fields into the conserved variables of one regime.
///
/// # Example
///
/// ```
/// use rhd_rs::equations::IdealGas;
/// use rhd_rs::state::{ConservedStateBuilder, PrimitiveState};
/// use rhd_rs::types::Regime;
///
/// let gas = IdealGas::new(1.4).unwrap();
/// let primitive = PrimitiveState::one_d(vec![1.0], vec![1.0], vec![0.0]).unwrap();
/// let state = ConservedStateBuilder::new(gas, Regime::Classical)
///     .build(&primitive)
///     .unwrap();
///
/// let energy = state.conserved.variable(2)[0];
/// assert!((energy - 2.5).abs() < 1e-14);
/// assert!(state.lorentz.is_none());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConservedStateBuilder {
    system: HydroSystem,
}

impl ConservedStateBuilder {
    pub fn new(gas: IdealGas, regime: Regime) -> Self {
        Self {
            system: HydroSystem::new(regime, gas),
        }
    }

    #[inline]
    pub fn regime(&self) -> Regime {
        self.system.regime()
    }

    /// Conserved vector and Lorentz factor of a single constant state.
    pub fn convert_cell(&self, prim: &PrimitiveCell) -> Result<(ConservedCell, f64)> {
        self.system.to_conserved(prim)
    }

    /// Convert every cell of `primitive`.
    ///
    /// Relativistic builds fail if any cell has |v| >= 1, reporting the
    /// lowest such flat index. `primitive` is not modified.
    pub fn build(&self, primitive: &PrimitiveState) -> Result<ConservedState> {
        let cells = map_cells(primitive.n_cells(), |c| {
            self.system
                .to_conserved(&primitive.cell(c))
                .map_err(|e| e.at_cell(c))
        })?;
        Ok(self.assemble(primitive.shape(), GhostLayout::none(), &cells))
    }

    /// Lay out converted cells in a field of the given shape and ghost layout.
    pub(crate) fn assemble(
        &self,
        shape: GridShape,
        ghosts: GhostLayout,
        cells: &[(ConservedCell, f64)],
    ) -> ConservedState {
        let dims = shape.dimensionality();
        let n = shape.n_cells();
        let mut data = vec![0.0; dims.n_vars() * n];
        for (c, (cell, _)) in cells.iter().enumerate() {
            for (var, value) in cell.components(dims).into_iter().enumerate() {
                data[var * n + c] = value;
            }
        }

        let conserved = ConservedField::from_parts(self.regime(), shape, ghosts, data);
        let lorentz = match self.regime() {
            Regime::Classical => None,
            Regime::Relativistic => Some(LorentzFactorField::from_parts(
                shape,
                ghosts,
                cells.iter().map(|(_, w)| *w).collect(),
            )),
        };

        ConservedState { conserved, lorentz }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SetupError};

    fn gas() -> IdealGas {
        IdealGas::new(1.4).unwrap()
    }

    #[test]
    fn test_classical_build() {
        let primitive =
            PrimitiveState::one_d(vec![1.0, 2.0], vec![1.0, 0.4], vec![0.0, 1.0]).unwrap();
        let state = ConservedStateBuilder::new(gas(), Regime::Classical)
            .build(&primitive)
            .unwrap();
        let c = &state.conserved;

        assert_eq!(c.variable(0), &[1.0, 2.0]);
        assert_eq!(c.variable(1), &[0.0, 2.0]);
        assert!((c.variable(2)[0] - 2.5).abs() < 1e-14);
        // E = 0.4/0.4 + 0.5 * 2 * 1
        assert!((c.variable(2)[1] - 2.0).abs() < 1e-14);
        assert!(state.lorentz.is_none());
    }

    #[test]
    fn test_relativistic_build_carries_lorentz() {
        let shape = GridShape::two_d(2, 2).unwrap();
        let primitive = PrimitiveState::uniform(shape, PrimitiveCell::new_2d(1.0, 1.0, 0.6, 0.0));
        let state = ConservedStateBuilder::new(gas(), Regime::Relativistic)
            .build(&primitive)
            .unwrap();

        let w = state.lorentz.unwrap();
        assert_eq!(w.shape(), state.conserved.shape());
        assert_eq!(w.ghosts(), state.conserved.ghosts());
        for c in 0..4 {
            assert!((w.get(c) - 1.25).abs() < 1e-14);
            assert!((state.conserved.cell(c).mass - 1.25).abs() < 1e-14);
        }
    }

    #[test]
    fn test_superluminal_cell_reported() {
        let primitive =
            PrimitiveState::one_d(vec![1.0; 3], vec![1.0; 3], vec![0.1, 0.5, 1.0]).unwrap();
        let err = ConservedStateBuilder::new(gas(), Regime::Relativistic)
            .build(&primitive)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(matches!(err, SetupError::Superluminal { cell: Some(2), .. }));
    }

    #[test]
    fn test_lowest_superluminal_cell_reported() {
        let mut v = vec![0.5; 4096];
        for c in [7, 1500, 4000] {
            v[c] = 1.2;
        }
        let primitive = PrimitiveState::one_d(vec![1.0; 4096], vec![1.0; 4096], v).unwrap();
        let err = ConservedStateBuilder::new(gas(), Regime::Relativistic)
            .build(&primitive)
            .unwrap_err();
        assert!(matches!(err, SetupError::Superluminal { cell: Some(7), .. }));
    }

    #[test]
    fn test_classical_ignores_speed_limit() {
        let primitive = PrimitiveState::one_d(vec![1.0], vec![1.0], vec![3.0]).unwrap();
        assert!(ConservedStateBuilder::new(gas(), Regime::Classical)
            .build(&primitive)
            .is_ok());
    }

    #[test]
    fn test_round_trip_through_field() {
        let gas = gas();
        let primitive = PrimitiveState::one_d(
            vec![1.0, 0.5, 10.0, 1.0, 1e-3],
            vec![0.1, 5.0, 1.0, 1000.0, 1000.0],
            vec![0.0, -0.7, 0.95, 0.99999, -0.9999],
        )
        .unwrap();

        for regime in [Regime::Classical, Regime::Relativistic] {
            let state = ConservedStateBuilder::new(gas, regime).build(&primitive).unwrap();
            let back = state
                .conserved
                .to_primitive(gas, state.lorentz.as_ref())
                .unwrap();

            for c in 0..5 {
                let (a, b) = (back.cell(c), primitive.cell(c));
                assert!((a.rho - b.rho).abs() < 1e-9 * b.rho.max(1.0));
                assert!((a.p - b.p).abs() < 1e-9 * b.p.max(1.0));
                assert!((a.v1 - b.v1).abs() < 1e-9);
            }
        }
    }
}
