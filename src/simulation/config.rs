//! Simulation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boundary::GhostZoneManager;
use crate::equations::IdealGas;
use crate::error::{Result, SetupError};
use crate::mesh::{AxisSpacing, Geometry};
use crate::types::{
    BoundaryMode, CoordinateSystem, Dimensionality, GridShape, Order, Regime, RiemannScheme,
    Spacing,
};

/// Options of a single run.
///
/// Only `gamma`, `geometry` and `point_counts` are required; everything else
/// has a default:
///
/// | Field | Default |
/// |-------|---------|
/// | `regime` | classical |
/// | `coordinate_system` | cartesian |
/// | `end_time` | 0.1 |
/// | `time_step` | 1e-4 |
/// | `order` | first |
/// | `boundary` | outflow |
/// | `cfl_number` | 0.4 |
/// | `riemann_scheme` | hlle |
/// | `spacing` | per coordinate system (see [`AxisSpacing::for_coordinates`]) |
/// | `source_terms` | none (zero-filled) |
///
/// # Example
///
/// ```
/// use rhd_rs::simulation::SimulationConfig;
/// use rhd_rs::types::{Order, Regime};
///
/// let config = SimulationConfig::from_json_str(r#"{
///     "gamma": 1.4,
///     "geometry": {"one_d": {"bounds": {"min": 0.0, "max": 1.0}}},
///     "point_counts": {"one_d": 100},
///     "order": "second"
/// }"#).unwrap();
///
/// assert_eq!(config.order, Order::Second);
/// assert_eq!(config.regime, Regime::Classical);
/// assert_eq!(config.cfl_number, 0.4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Adiabatic index (> 1)
    pub gamma: f64,
    /// Domain bounds
    pub geometry: Geometry,
    /// Interior cells per axis
    pub point_counts: GridShape,
    #[serde(default)]
    pub regime: Regime,
    #[serde(default)]
    pub coordinate_system: CoordinateSystem,
    /// Time to integrate to
    #[serde(default = "default_end_time")]
    pub end_time: f64,
    /// Seed time step handed to the engine
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    #[serde(default)]
    pub order: Order,
    #[serde(default)]
    pub boundary: BoundaryMode,
    #[serde(default = "default_cfl")]
    pub cfl_number: f64,
    #[serde(default)]
    pub riemann_scheme: RiemannScheme,
    /// Explicit spacing per axis; `None` picks the coordinate-system default
    #[serde(default)]
    pub spacing: Option<AxisSpacing>,
    /// Source terms over the interior, laid out like a conserved field
    /// (`n_vars × n_cells`, variable-major)
    #[serde(default)]
    pub source_terms: Option<Vec<f64>>,
}

fn default_end_time() -> f64 {
    0.1
}

fn default_time_step() -> f64 {
    1e-4
}

fn default_cfl() -> f64 {
    0.4
}

impl SimulationConfig {
    /// Configuration with every optional field at its default.
    pub fn new(gamma: f64, geometry: Geometry, point_counts: GridShape) -> Self {
        Self {
            gamma,
            geometry,
            point_counts,
            regime: Regime::default(),
            coordinate_system: CoordinateSystem::default(),
            end_time: default_end_time(),
            time_step: default_time_step(),
            order: Order::default(),
            boundary: BoundaryMode::default(),
            cfl_number: default_cfl(),
            riemann_scheme: RiemannScheme::default(),
            spacing: None,
            source_terms: None,
        }
    }

    /// Parse a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_regime(mut self, regime: Regime) -> Self {
        self.regime = regime;
        self
    }

    pub fn with_coordinate_system(mut self, coordinate_system: CoordinateSystem) -> Self {
        self.coordinate_system = coordinate_system;
        self
    }

    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_cfl(mut self, cfl_number: f64) -> Self {
        self.cfl_number = cfl_number;
        self
    }

    pub fn with_riemann_scheme(mut self, riemann_scheme: RiemannScheme) -> Self {
        self.riemann_scheme = riemann_scheme;
        self
    }

    /// Override the spacing of both axes.
    pub fn with_spacing(mut self, spacing: AxisSpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Set source terms over the interior, variable-major.
    pub fn with_source_terms(mut self, source_terms: Vec<f64>) -> Self {
        self.source_terms = Some(source_terms);
        self
    }

    /// Dimensionality of the configured grid.
    pub fn dimensionality(&self) -> Dimensionality {
        self.point_counts.dimensionality()
    }

    /// Equation of state.
    pub fn gas(&self) -> Result<IdealGas> {
        IdealGas::new(self.gamma)
    }

    /// Spacing actually used for each axis.
    pub fn effective_spacing(&self) -> AxisSpacing {
        self.spacing
            .unwrap_or_else(|| AxisSpacing::for_coordinates(self.coordinate_system))
    }

    /// Ghost-zone policy derived from `order` and `boundary`.
    pub fn ghost_manager(&self) -> GhostZoneManager {
        GhostZoneManager::new(self.order, self.boundary)
    }

    /// Check every option and their mutual consistency.
    pub fn validate(&self) -> Result<()> {
        self.gas()?;

        if !(self.cfl_number.is_finite() && self.cfl_number > 0.0) {
            return Err(SetupError::invalid(
                "cfl_number",
                self.cfl_number,
                "must be positive and finite",
            ));
        }
        if !(self.end_time.is_finite() && self.end_time >= 0.0) {
            return Err(SetupError::invalid(
                "end_time",
                self.end_time,
                "must be non-negative and finite",
            ));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SetupError::invalid(
                "time_step",
                self.time_step,
                "must be positive and finite",
            ));
        }

        // Deserialized shapes bypass the GridShape constructors
        if self.point_counts.n_cells() == 0 {
            return Err(SetupError::invalid(
                "point_counts",
                self.point_counts,
                "every axis needs at least one cell",
            ));
        }

        if self.geometry.dimensionality() != self.dimensionality() {
            return Err(SetupError::DimensionalityMismatch(format!(
                "geometry is {} but point counts {} are {}",
                self.geometry.dimensionality(),
                self.point_counts,
                self.dimensionality()
            )));
        }

        let spacing = self.effective_spacing();
        let axes = [
            (Some(self.geometry.x1()), spacing.x1),
            (self.geometry.x2(), spacing.x2),
        ];
        for (bounds, mode) in axes {
            if let (Some(bounds), Spacing::Logarithmic) = (bounds, mode) {
                if !bounds.is_positive() {
                    return Err(SetupError::NonPositiveLogBounds {
                        min: bounds.min,
                        max: bounds.max,
                    });
                }
            }
        }

        if let Some(sources) = &self.source_terms {
            let expected = self.dimensionality().n_vars() * self.point_counts.n_cells();
            if sources.len() != expected {
                return Err(SetupError::shape_mismatch(
                    "source_terms",
                    expected,
                    sources.len(),
                ));
            }
        }

        Ok(())
    }
}
