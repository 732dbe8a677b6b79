//! Classical (Newtonian) Euler equations.
//!
//! Conserved state per cell:
//!
//! - ρ        (mass density)
//! - ρv₁, ρv₂ (momentum density)
//! - E = p/(γ - 1) + ½ρ|v|² (total energy density)

use super::{ConservedCell, ConservedVariables, IdealGas, PrimitiveCell};
use crate::error::{Result, SetupError};
use crate::types::Regime;

/// Newtonian Euler equations for an ideal gas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Euler {
    /// Equation of state
    pub gas: IdealGas,
}

impl Euler {
    /// Create the Euler system for the given gas.
    pub fn new(gas: IdealGas) -> Self {
        Self { gas }
    }

    /// Total energy density E = p/(γ - 1) + ½ρ|v|².
    #[inline]
    pub fn total_energy(&self, prim: &PrimitiveCell) -> f64 {
        self.gas.internal_energy_density(prim.p) + 0.5 * prim.rho * prim.speed_squared()
    }
}

impl ConservedVariables for Euler {
    fn regime(&self) -> Regime {
        Regime::Classical
    }

    fn gas(&self) -> &IdealGas {
        &self.gas
    }

    fn to_conserved(&self, prim: &PrimitiveCell) -> Result<(ConservedCell, f64)> {
        let cons = ConservedCell {
            mass: prim.rho,
            momentum_1: prim.rho * prim.v1,
            momentum_2: prim.rho * prim.v2,
            energy: self.total_energy(prim),
        };
        Ok((cons, 1.0))
    }

    fn to_primitive(
        &self,
        cons: &ConservedCell,
        _lorentz_hint: Option<f64>,
    ) -> Result<PrimitiveCell> {
        let rho = cons.mass;
        if !(rho > 0.0) {
            return Err(SetupError::PrimitiveRecovery {
                cell: None,
                reason: format!("non-positive density {}", rho),
            });
        }

        let v1 = cons.momentum_1 / rho;
        let v2 = cons.momentum_2 / rho;
        let kinetic = 0.5 * rho * (v1 * v1 + v2 * v2);
        let p = (self.gas.gamma - 1.0) * (cons.energy - kinetic);

        Ok(PrimitiveCell { rho, p, v1, v2 })
    }

    fn max_signal_speed(&self, prim: &PrimitiveCell) -> f64 {
        prim.speed_squared().sqrt() + self.gas.sound_speed(prim.rho, prim.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn euler(gamma: f64) -> Euler {
        Euler::new(IdealGas::new(gamma).unwrap())
    }

    #[test]
    fn test_sod_states() {
        let eq = euler(1.4);

        let (left, w) = eq.to_conserved(&PrimitiveCell::new_1d(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(w, 1.0);
        assert!((left.mass - 1.0).abs() < TOL);
        assert!(left.momentum_1.abs() < TOL);
        assert!((left.energy - 2.5).abs() < TOL);

        let (right, _) = eq.to_conserved(&PrimitiveCell::new_1d(0.125, 0.1, 0.0)).unwrap();
        assert!((right.mass - 0.125).abs() < TOL);
        assert!((right.energy - 0.25).abs() < TOL);
    }

    #[test]
    fn test_kinetic_energy_included() {
        let eq = euler(5.0 / 3.0);
        let prim = PrimitiveCell::new_2d(2.0, 1.5, 3.0, -4.0);
        let (cons, _) = eq.to_conserved(&prim).unwrap();

        // E = 1.5 / (2/3) + 0.5 * 2 * 25
        assert!((cons.energy - (2.25 + 25.0)).abs() < TOL);
        assert!((cons.momentum_1 - 6.0).abs() < TOL);
        assert!((cons.momentum_2 + 8.0).abs() < TOL);
    }

    #[test]
    fn test_round_trip() {
        let eq = euler(1.4);
        let prim = PrimitiveCell::new_2d(0.7, 2.3, -1.1, 0.4);
        let (cons, _) = eq.to_conserved(&prim).unwrap();
        let back = eq.to_primitive(&cons, None).unwrap();

        assert!((back.rho - prim.rho).abs() < TOL);
        assert!((back.p - prim.p).abs() < TOL);
        assert!((back.v1 - prim.v1).abs() < TOL);
        assert!((back.v2 - prim.v2).abs() < TOL);
    }

    #[test]
    fn test_vacuum_rejected() {
        let eq = euler(1.4);
        let cons = ConservedCell {
            mass: 0.0,
            momentum_1: 0.0,
            momentum_2: 0.0,
            energy: 1.0,
        };
        assert!(eq.to_primitive(&cons, None).is_err());
    }
}
