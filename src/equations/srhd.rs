//! Special-relativistic hydrodynamics (SRHD).
//!
//! Conserved state per cell (units with c = 1):
//!
//! - D   = ρW                 (lab-frame density)
//! - Sᵢ  = ρhW²vᵢ             (momentum density)
//! - τ   = ρhW² - p - ρW      (energy density minus rest mass)
//!
//! with W = 1/sqrt(1 - |v|²) and h = 1 + γp/((γ - 1)ρ).
//!
//! The inverse map has no closed form. It is solved by Newton-Raphson on the
//! pressure:
//!
//! f(p) = (γ - 1)ρ(p)ε(p) - p,   f'(p) = |v|²c_s² - 1
//!
//! where v, W, ρ and ε are all recomputed from (D, S, τ) and the current p.

use super::{ConservedCell, ConservedVariables, IdealGas, PrimitiveCell};
use crate::error::{Result, SetupError};
use crate::types::Regime;

/// Relative tolerance on the pressure update.
const PRESSURE_TOL: f64 = 1e-12;

/// Relative step below which a stalled iteration is accepted.
///
/// For W in the hundreds the update bottoms out near 1e-11 relative and
/// oscillates between two neighbouring floats instead of shrinking further.
const STALL_TOL: f64 = 1e-9;

/// Iteration cap for the pressure solve.
const MAX_ITERATIONS: usize = 50;

/// Smallest admissible pressure above the causality floor.
const PRESSURE_FLOOR: f64 = 1e-15;

/// Special-relativistic Euler equations for an ideal gas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativisticEuler {
    /// Equation of state
    pub gas: IdealGas,
}

impl RelativisticEuler {
    /// Create the SRHD system for the given gas.
    pub fn new(gas: IdealGas) -> Self {
        Self { gas }
    }

    /// Lorentz factor W = 1/sqrt(1 - |v|²).
    ///
    /// Fails with a domain error if |v| >= 1.
    pub fn lorentz_factor(v1: f64, v2: f64) -> Result<f64> {
        let v_sq = v1 * v1 + v2 * v2;
        if !(v_sq < 1.0) {
            return Err(SetupError::Superluminal {
                cell: None,
                speed: v_sq.sqrt(),
            });
        }
        Ok(1.0 / (1.0 - v_sq).sqrt())
    }

    /// Initial pressure estimate for the Newton iteration.
    fn pressure_seed(&self, d: f64, s: f64, tau: f64, lorentz_hint: Option<f64>) -> f64 {
        // A known Lorentz factor pins |v|, and |v| = |S| / (τ + D + p) gives p directly
        if let Some(w) = lorentz_hint.filter(|w| *w > 1.0 && w.is_finite()) {
            let v = (1.0 - 1.0 / (w * w)).sqrt();
            if v > 0.0 && s > 0.0 {
                return s / v - tau - d;
            }
        }
        // Rest frame: τ = p/(γ - 1)
        (self.gas.gamma - 1.0) * tau
    }
}

impl ConservedVariables for RelativisticEuler {
    fn regime(&self) -> Regime {
        Regime::Relativistic
    }

    fn gas(&self) -> &IdealGas {
        &self.gas
    }

    fn to_conserved(&self, prim: &PrimitiveCell) -> Result<(ConservedCell, f64)> {
        let w = Self::lorentz_factor(prim.v1, prim.v2)?;
        let h = self.gas.specific_enthalpy(prim.rho, prim.p);
        let rho_h_w2 = prim.rho * h * w * w;

        let cons = ConservedCell {
            mass: prim.rho * w,
            momentum_1: rho_h_w2 * prim.v1,
            momentum_2: rho_h_w2 * prim.v2,
            energy: rho_h_w2 - prim.p - prim.rho * w,
        };
        Ok((cons, w))
    }

    fn to_primitive(
        &self,
        cons: &ConservedCell,
        lorentz_hint: Option<f64>,
    ) -> Result<PrimitiveCell> {
        let gamma = self.gas.gamma;
        let d = cons.mass;
        let tau = cons.energy;
        let s = (cons.momentum_1 * cons.momentum_1 + cons.momentum_2 * cons.momentum_2).sqrt();

        if !(d > 0.0) {
            return Err(SetupError::PrimitiveRecovery {
                cell: None,
                reason: format!("non-positive lab-frame density D = {}", d),
            });
        }

        // |v| < 1 requires p > |S| - τ - D
        let p_min = (s - tau - d).max(0.0) + PRESSURE_FLOOR;
        let mut p = self.pressure_seed(d, s, tau, lorentz_hint).max(p_min);
        let mut last_step = f64::INFINITY;

        for _ in 0..MAX_ITERATIONS {
            let e_total = tau + d + p;
            let v_sq = (s / e_total).powi(2);
            let w = 1.0 / (1.0 - v_sq).sqrt();
            let rho = d / w;
            let eps = (tau + d * (1.0 - w) + p * (1.0 - w * w)) / (d * w);

            let cs_sq = gamma * (gamma - 1.0) * eps / (1.0 + gamma * eps);
            let f = (gamma - 1.0) * rho * eps - p;
            let df = v_sq * cs_sq - 1.0;

            let p_next = (p - f / df).max(p_min);
            let step = (p_next - p).abs();
            // Newton at least halves the step until rounding takes over
            let stalled = step <= STALL_TOL * p_next && step > 0.5 * last_step;
            let converged = step <= PRESSURE_TOL * p_next || stalled;
            p = p_next;
            last_step = step;

            if converged {
                let e_total = tau + d + p;
                let v1 = cons.momentum_1 / e_total;
                let v2 = cons.momentum_2 / e_total;
                let w = 1.0 / (1.0 - (v1 * v1 + v2 * v2)).sqrt();
                return Ok(PrimitiveCell {
                    rho: d / w,
                    p,
                    v1,
                    v2,
                });
            }
        }

        Err(SetupError::PrimitiveRecovery {
            cell: None,
            reason: format!(
                "pressure iteration did not converge in {} steps (D = {}, |S| = {}, tau = {})",
                MAX_ITERATIONS, d, s, tau
            ),
        })
    }

    fn max_signal_speed(&self, prim: &PrimitiveCell) -> f64 {
        // Relativistic velocity addition of the flow and sound speeds
        let v = prim.speed_squared().sqrt();
        let cs = self.gas.relativistic_sound_speed(prim.rho, prim.p);
        (v + cs) / (1.0 + v * cs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srhd(gamma: f64) -> RelativisticEuler {
        RelativisticEuler::new(IdealGas::new(gamma).unwrap())
    }

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() <= tol * b.abs().max(1.0),
            "expected {}, got {}",
            b,
            a
        );
    }

    #[test]
    fn test_lorentz_factor() {
        assert_eq!(RelativisticEuler::lorentz_factor(0.0, 0.0).unwrap(), 1.0);
        let w = RelativisticEuler::lorentz_factor(0.6, 0.0).unwrap();
        assert_close(w, 1.25, 1e-14);
        // 2D speed combines both components
        let w = RelativisticEuler::lorentz_factor(0.6, 0.8 * 0.99).unwrap();
        assert!(w > 1.25);
    }

    #[test]
    fn test_superluminal_rejected() {
        assert!(matches!(
            RelativisticEuler::lorentz_factor(1.0, 0.0),
            Err(SetupError::Superluminal { .. })
        ));
        assert!(RelativisticEuler::lorentz_factor(0.8, 0.8).is_err());
        assert!(RelativisticEuler::lorentz_factor(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_rest_frame_reduces_to_internal_energy() {
        let eq = srhd(4.0 / 3.0);
        let (cons, w) = eq.to_conserved(&PrimitiveCell::new_1d(1.0, 1.0, 0.0)).unwrap();

        assert_eq!(w, 1.0);
        assert_close(cons.mass, 1.0, 1e-14);
        assert_close(cons.momentum_1, 0.0, 1e-14);
        // τ = ρh - p - ρ = p/(γ - 1)
        assert_close(cons.energy, 3.0, 1e-14);
    }

    #[test]
    fn test_moving_state() {
        let eq = srhd(5.0 / 3.0);
        let prim = PrimitiveCell::new_1d(1.0, 0.5, 0.6);
        let (cons, w) = eq.to_conserved(&prim).unwrap();

        let h = 1.0 + (5.0 / 3.0) * 0.5 / ((2.0 / 3.0) * 1.0);
        assert_close(w, 1.25, 1e-14);
        assert_close(cons.mass, 1.25, 1e-14);
        assert_close(cons.momentum_1, h * 1.5625 * 0.6, 1e-14);
        assert_close(cons.energy, h * 1.5625 - 0.5 - 1.25, 1e-14);
    }

    #[test]
    fn test_round_trip_1d() {
        let eq = srhd(4.0 / 3.0);
        for &(rho, p, v) in &[
            (1.0, 1.0, 0.0),
            (10.0, 13.33, 0.9),
            (1.0, 1e-6, -0.5),
            (0.1, 100.0, 0.99),
            // Hot, ultra-relativistic: W ~ 70 and W ~ 224
            (1.0, 1000.0, 0.9999),
            (1.0, 1000.0, 0.99999),
            (1e-3, 1e3, -0.99999),
        ] {
            let prim = PrimitiveCell::new_1d(rho, p, v);
            let (cons, _) = eq.to_conserved(&prim).unwrap();
            let back = eq.to_primitive(&cons, None).unwrap();

            assert_close(back.rho, rho, 1e-9);
            assert_close(back.p, p, 1e-9);
            assert_close(back.v1, v, 1e-9);
        }
    }

    #[test]
    fn test_round_trip_2d_with_hint() {
        let eq = srhd(5.0 / 3.0);
        let prim = PrimitiveCell::new_2d(2.0, 0.3, 0.4, -0.5);
        let (cons, w) = eq.to_conserved(&prim).unwrap();
        let back = eq.to_primitive(&cons, Some(w)).unwrap();

        assert_close(back.rho, prim.rho, 1e-10);
        assert_close(back.p, prim.p, 1e-10);
        assert_close(back.v1, prim.v1, 1e-10);
        assert_close(back.v2, prim.v2, 1e-10);
    }

    #[test]
    fn test_round_trip_hot_blast_wave_2d() {
        let eq = srhd(4.0 / 3.0);
        let prim = PrimitiveCell::new_2d(1.0, 1000.0, 0.7, -0.714);
        let (cons, w) = eq.to_conserved(&prim).unwrap();
        assert!(w > 50.0);

        for hint in [None, Some(w)] {
            let back = eq.to_primitive(&cons, hint).unwrap();
            assert_close(back.rho, prim.rho, 1e-9);
            assert_close(back.p, prim.p, 1e-9);
            assert_close(back.v1, prim.v1, 1e-9);
            assert_close(back.v2, prim.v2, 1e-9);
        }
    }

    #[test]
    fn test_signal_speed_subluminal() {
        let eq = srhd(4.0 / 3.0);
        let speed = eq.max_signal_speed(&PrimitiveCell::new_1d(1e-3, 1e3, 0.95));
        assert!(speed < 1.0);
        assert!(speed > 0.95);
    }
}
