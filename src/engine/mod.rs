//! Integration engine interface.
//!
//! The engine owns flux evaluation, the Runge-Kutta loop and adaptive time
//! step selection. This crate prepares its input and interprets its output.
//!
//! # Contract
//!
//! | Direction | Data |
//! |-----------|------|
//! | In  | padded [`ConservedField`], optional [`LorentzFactorField`], grid, sources (zero-filled if absent), γ, CFL number, order, Riemann scheme, coordinates, boundary mode, start/end time, seed time step |
//! | Out | evolved [`ConservedField`] of identical shape and ghost layout, at `end_time` |
//!
//! An engine is expected to conserve the evolved quantities in the absence
//! of sources, keep each step below
//! `cfl_number × min(cell width) / max(signal speed)` (see
//! [`EngineInput::cfl_time_step`]) and stay stable for well-posed input.

mod error;
mod variant;

pub use error::EngineError;
pub use variant::SolverVariant;

use std::path::Path;

use crate::equations::IdealGas;
use crate::io::{read_checkpoint, Checkpoint};
use crate::mesh::GridGeometry;
use crate::state::{ConservedField, LorentzFactorField};
use crate::types::{BoundaryMode, CoordinateSystem, Order, RiemannScheme};

/// Everything an engine entry point receives.
#[derive(Clone, Debug)]
pub struct EngineInput<'a> {
    /// Initial conserved field, ghost cells included
    pub conserved: &'a ConservedField,
    /// Lorentz factors matching `conserved` (relativistic only)
    pub lorentz: Option<&'a LorentzFactorField>,
    /// Source terms with the same shape and layout as `conserved`
    pub sources: &'a ConservedField,
    /// Cell-centre coordinates of the interior
    pub grid: &'a GridGeometry,
    pub gas: IdealGas,
    pub cfl_number: f64,
    pub order: Order,
    pub riemann_scheme: RiemannScheme,
    pub coordinate_system: CoordinateSystem,
    pub boundary: BoundaryMode,
    /// Simulation time of `conserved` (non-zero when resuming)
    pub start_time: f64,
    pub end_time: f64,
    /// Seed step; engines recompute adaptive steps under the CFL bound
    pub time_step: f64,
}

impl EngineInput<'_> {
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gas.gamma
    }

    /// Largest stable step for a given maximum signal speed.
    pub fn cfl_time_step(&self, max_signal_speed: f64) -> f64 {
        self.cfl_number * self.grid.min_width() / max_signal_speed
    }
}

/// A numerical engine with one entry point per solver variant.
///
/// Each entry point blocks until `end_time` is reached and returns the
/// evolved field. Errors are passed to the caller unchanged.
pub trait IntegrationEngine {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// 1D Newtonian hydrodynamics.
    fn classical_1d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError>;

    /// 1D special-relativistic hydrodynamics.
    fn relativistic_1d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError>;

    /// 2D Newtonian hydrodynamics.
    fn classical_2d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError>;

    /// 2D special-relativistic hydrodynamics.
    fn relativistic_2d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError>;

    /// Load a saved state to resume from.
    ///
    /// Defaults to the JSON format of [`crate::io`].
    fn load_checkpoint(&mut self, path: &Path) -> Result<Checkpoint, EngineError> {
        read_checkpoint(path)
    }
}

impl<E: IntegrationEngine + ?Sized> IntegrationEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn classical_1d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        (**self).classical_1d(input)
    }

    fn relativistic_1d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        (**self).relativistic_1d(input)
    }

    fn classical_2d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        (**self).classical_2d(input)
    }

    fn relativistic_2d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        (**self).relativistic_2d(input)
    }

    fn load_checkpoint(&mut self, path: &Path) -> Result<Checkpoint, EngineError> {
        (**self).load_checkpoint(path)
    }
}
