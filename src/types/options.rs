//! Enumerated simulation options.
//!
//! Every axis of variation in a run is an explicit value here rather than a
//! boolean flag, so the dispatcher can match on the combination directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Physical regime of the fluid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Newtonian (Euler) hydrodynamics
    #[default]
    Classical,
    /// Special-relativistic hydrodynamics
    Relativistic,
}

/// Spatial dimensionality of the problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimensionality {
    /// One spatial dimension
    #[serde(rename = "1")]
    One,
    /// Two spatial dimensions
    #[serde(rename = "2")]
    Two,
}

impl Dimensionality {
    /// Infer dimensionality from the arity of a primitive state tuple.
    ///
    /// 3 variables (ρ, p, v) mean 1D; 4 variables (ρ, p, v₁, v₂) mean 2D.
    pub fn from_arity(arity: usize) -> Result<Self, SetupError> {
        match arity {
            3 => Ok(Self::One),
            4 => Ok(Self::Two),
            n => Err(SetupError::UnsupportedArity(n)),
        }
    }

    /// Number of conserved variables per cell.
    pub fn n_vars(self) -> usize {
        match self {
            Self::One => 3,
            Self::Two => 4,
        }
    }

    /// Number of spatial axes.
    pub fn n_axes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.n_axes())
    }
}

/// Order of accuracy of the time integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// First order (piecewise constant, RK1)
    #[default]
    First,
    /// Second order (piecewise linear reconstruction, RK2)
    Second,
}

impl Order {
    /// Ghost cells needed per side for the reconstruction stencil.
    pub fn ghost_width(self) -> usize {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// Boundary treatment at the edges of the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Zero-gradient extrapolation through ghost cells
    #[default]
    Outflow,
    /// Wrap-around indexing handled by the engine; no ghost cells exist
    Periodic,
}

/// Coordinate system of the mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    /// Cartesian (x, y)
    #[default]
    Cartesian,
    /// Spherical (r, θ)
    Spherical,
}

/// Approximate Riemann solver used by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiemannScheme {
    /// Harten-Lax-van Leer-Einfeldt
    #[default]
    #[serde(rename = "hlle")]
    Hlle,
    /// HLL with restored contact wave
    #[serde(rename = "hllc")]
    Hllc,
}

/// Spacing of grid points along an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Evenly spaced in the coordinate
    #[default]
    Uniform,
    /// Evenly spaced in log(coordinate)
    Logarithmic,
}

/// Implements `FromStr` and `Display` for a unit-variant option enum.
macro_rules! option_strings {
    (@first $first:literal $(, $rest:literal)*) => { $first };
    ($ty:ty, $what:literal, { $($variant:ident => [$($name:literal),+]),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = SetupError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($($name)|+ => Ok(Self::$variant),)+
                    _ => Err(SetupError::invalid($what, s, "unrecognized option")),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $(Self::$variant => option_strings!(@first $($name),+),)+
                };
                f.write_str(name)
            }
        }
    };
}

option_strings!(Regime, "regime", {
    Classical => ["classical", "newtonian"],
    Relativistic => ["relativistic", "srhd"],
});

option_strings!(Order, "order", {
    First => ["first", "1"],
    Second => ["second", "2"],
});

option_strings!(BoundaryMode, "boundary", {
    Outflow => ["outflow"],
    Periodic => ["periodic"],
});

option_strings!(CoordinateSystem, "coordinate_system", {
    Cartesian => ["cartesian"],
    Spherical => ["spherical"],
});

option_strings!(RiemannScheme, "riemann_scheme", {
    Hlle => ["hlle", "hll"],
    Hllc => ["hllc"],
});

option_strings!(Spacing, "spacing", {
    Uniform => ["uniform", "linspace", "linear"],
    Logarithmic => ["logarithmic", "logspace", "log"],
});
