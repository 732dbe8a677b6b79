//! Per-cell conversions between primitive and conserved variables.
//!
//! Two regimes share one interface:
//!
//! | Regime        | Conserved state      | Energy variable          |
//! |---------------|----------------------|--------------------------|
//! | Classical     | (ρ, ρv₁, ρv₂, E)     | E = p/(γ-1) + ½ρ\|v\|²   |
//! | Relativistic  | (D, S₁, S₂, τ)       | τ = ρhW² - p - ρW        |
//!
//! In 1D the second velocity component is zero and the second momentum
//! component is dropped when laying cells out in a field.

mod euler;
mod ideal_gas;
mod srhd;

pub use euler::Euler;
pub use ideal_gas::IdealGas;
pub use srhd::RelativisticEuler;

use crate::error::{Result, SetupError};
use crate::types::{Dimensionality, Regime};

/// Primitive variables of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrimitiveCell {
    /// Rest-mass density ρ
    pub rho: f64,
    /// Pressure p
    pub p: f64,
    /// Velocity along x1
    pub v1: f64,
    /// Velocity along x2 (zero in 1D)
    pub v2: f64,
}

impl PrimitiveCell {
    /// A 1D cell (v₂ = 0).
    pub fn new_1d(rho: f64, p: f64, v: f64) -> Self {
        Self { rho, p, v1: v, v2: 0.0 }
    }

    /// A 2D cell.
    pub fn new_2d(rho: f64, p: f64, v1: f64, v2: f64) -> Self {
        Self { rho, p, v1, v2 }
    }

    /// Build from a (ρ, p, v) or (ρ, p, v₁, v₂) tuple.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match *values {
            [rho, p, v] => Ok(Self::new_1d(rho, p, v)),
            [rho, p, v1, v2] => Ok(Self::new_2d(rho, p, v1, v2)),
            _ => Err(SetupError::UnsupportedArity(values.len())),
        }
    }

    /// |v|²
    #[inline]
    pub fn speed_squared(&self) -> f64 {
        self.v1 * self.v1 + self.v2 * self.v2
    }
}

/// Conserved variables of one cell.
///
/// Field names follow the classical meaning; in the relativistic regime
/// `mass` holds D, `momentum_*` hold Sᵢ and `energy` holds τ.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConservedCell {
    pub mass: f64,
    pub momentum_1: f64,
    pub momentum_2: f64,
    pub energy: f64,
}

impl ConservedCell {
    /// Components in field order for the given dimensionality.
    ///
    /// 1D: `[mass, momentum_1, energy]`; 2D: `[mass, momentum_1, momentum_2, energy]`.
    pub fn components(&self, dims: Dimensionality) -> Vec<f64> {
        match dims {
            Dimensionality::One => vec![self.mass, self.momentum_1, self.energy],
            Dimensionality::Two => vec![self.mass, self.momentum_1, self.momentum_2, self.energy],
        }
    }

    /// Inverse of [`ConservedCell::components`].
    pub fn from_components(values: &[f64]) -> Result<Self> {
        match *values {
            [mass, momentum_1, energy] => Ok(Self {
                mass,
                momentum_1,
                momentum_2: 0.0,
                energy,
            }),
            [mass, momentum_1, momentum_2, energy] => Ok(Self {
                mass,
                momentum_1,
                momentum_2,
                energy,
            }),
            _ => Err(SetupError::UnsupportedArity(values.len())),
        }
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite()
            && self.momentum_1.is_finite()
            && self.momentum_2.is_finite()
            && self.energy.is_finite()
    }
}

/// Primitive/conserved conversion for one hydrodynamic regime.
pub trait ConservedVariables: Send + Sync {
    /// Regime this system models.
    fn regime(&self) -> Regime;

    /// Equation of state.
    fn gas(&self) -> &IdealGas;

    /// Convert primitives to conserved variables.
    ///
    /// Also returns the cell's Lorentz factor (1 in the classical regime).
    fn to_conserved(&self, prim: &PrimitiveCell) -> Result<(ConservedCell, f64)>;

    /// Recover primitives from conserved variables.
    ///
    /// `lorentz_hint` is a previous Lorentz factor used to seed iterative
    /// recovery; it is ignored where the inversion is closed-form.
    fn to_primitive(
        &self,
        cons: &ConservedCell,
        lorentz_hint: Option<f64>,
    ) -> Result<PrimitiveCell>;

    /// Largest characteristic speed |λ| in the cell.
    fn max_signal_speed(&self, prim: &PrimitiveCell) -> f64;
}

/// Regime-selected hydrodynamic system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HydroSystem {
    Classical(Euler),
    Relativistic(RelativisticEuler),
}

impl HydroSystem {
    /// Pick the system for a regime.
    pub fn new(regime: Regime, gas: IdealGas) -> Self {
        match regime {
            Regime::Classical => Self::Classical(Euler::new(gas)),
            Regime::Relativistic => Self::Relativistic(RelativisticEuler::new(gas)),
        }
    }

    fn inner(&self) -> &dyn ConservedVariables {
        match self {
            Self::Classical(eq) => eq,
            Self::Relativistic(eq) => eq,
        }
    }
}

impl ConservedVariables for HydroSystem {
    fn regime(&self) -> Regime {
        self.inner().regime()
    }

    fn gas(&self) -> &IdealGas {
        match self {
            Self::Classical(eq) => &eq.gas,
            Self::Relativistic(eq) => &eq.gas,
        }
    }

    fn to_conserved(&self, prim: &PrimitiveCell) -> Result<(ConservedCell, f64)> {
        self.inner().to_conserved(prim)
    }

    fn to_primitive(
        &self,
        cons: &ConservedCell,
        lorentz_hint: Option<f64>,
    ) -> Result<PrimitiveCell> {
        self.inner().to_primitive(cons, lorentz_hint)
    }

    fn max_signal_speed(&self, prim: &PrimitiveCell) -> f64 {
        self.inner().max_signal_speed(prim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_from_slice() {
        let cell = PrimitiveCell::from_slice(&[1.0, 2.0, 0.5]).unwrap();
        assert_eq!(cell, PrimitiveCell::new_1d(1.0, 2.0, 0.5));

        let cell = PrimitiveCell::from_slice(&[1.0, 2.0, 0.5, -0.5]).unwrap();
        assert_eq!(cell.v2, -0.5);

        assert!(matches!(
            PrimitiveCell::from_slice(&[1.0, 2.0]),
            Err(SetupError::UnsupportedArity(2))
        ));
    }

    #[test]
    fn test_components_layout() {
        let cell = ConservedCell {
            mass: 1.0,
            momentum_1: 2.0,
            momentum_2: 3.0,
            energy: 4.0,
        };
        assert_eq!(cell.components(Dimensionality::One), vec![1.0, 2.0, 4.0]);
        assert_eq!(cell.components(Dimensionality::Two), vec![1.0, 2.0, 3.0, 4.0]);

        let back = ConservedCell::from_components(&[1.0, 2.0, 4.0]).unwrap();
        assert_eq!(back.momentum_2, 0.0);
        assert_eq!(back.energy, 4.0);
    }

    #[test]
    fn test_system_dispatch() {
        let gas = IdealGas::new(1.4).unwrap();
        let prim = PrimitiveCell::new_1d(1.0, 1.0, 0.5);

        let classical = HydroSystem::new(Regime::Classical, gas);
        let relativistic = HydroSystem::new(Regime::Relativistic, gas);

        assert_eq!(classical.regime(), Regime::Classical);
        assert_eq!(relativistic.regime(), Regime::Relativistic);

        let (c, w_c) = classical.to_conserved(&prim).unwrap();
        let (r, w_r) = relativistic.to_conserved(&prim).unwrap();
        assert_eq!(w_c, 1.0);
        assert!(w_r > 1.0);
        assert!(r.mass > c.mass);
    }
}
