//! Ideal gas equation of state.
//!
//! p = (γ - 1) ρ ε
//!
//! where:
//! - p = pressure
//! - ρ = rest-mass density
//! - ε = specific internal energy
//! - γ = adiabatic index

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};

/// Ideal gas with constant adiabatic index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdealGas {
    /// Adiabatic index γ (must be > 1)
    pub gamma: f64,
}

impl IdealGas {
    /// Create an ideal gas. Fails unless `gamma > 1`.
    pub fn new(gamma: f64) -> Result<Self> {
        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(SetupError::invalid("gamma", gamma, "adiabatic index must be > 1"));
        }
        Ok(Self { gamma })
    }

    /// Monatomic gas (γ = 5/3).
    pub fn monatomic() -> Self {
        Self { gamma: 5.0 / 3.0 }
    }

    /// Radiation-dominated gas (γ = 4/3).
    pub fn radiation() -> Self {
        Self { gamma: 4.0 / 3.0 }
    }

    /// Internal energy per unit volume ρε = p / (γ - 1).
    #[inline]
    pub fn internal_energy_density(&self, pressure: f64) -> f64 {
        pressure / (self.gamma - 1.0)
    }

    /// Pressure from density and specific internal energy.
    #[inline]
    pub fn pressure(&self, density: f64, specific_internal_energy: f64) -> f64 {
        (self.gamma - 1.0) * density * specific_internal_energy
    }

    /// Relativistic specific enthalpy h = 1 + γp / ((γ - 1)ρ).
    #[inline]
    pub fn specific_enthalpy(&self, density: f64, pressure: f64) -> f64 {
        1.0 + self.gamma * pressure / ((self.gamma - 1.0) * density)
    }

    /// Newtonian sound speed c = sqrt(γp/ρ).
    #[inline]
    pub fn sound_speed(&self, density: f64, pressure: f64) -> f64 {
        (self.gamma * pressure / density).sqrt()
    }

    /// Relativistic sound speed c = sqrt(γp / (ρh)).
    #[inline]
    pub fn relativistic_sound_speed(&self, density: f64, pressure: f64) -> f64 {
        let h = self.specific_enthalpy(density, pressure);
        (self.gamma * pressure / (density * h)).sqrt()
    }
}
