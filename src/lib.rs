//! # rhd-rs
//!
//! Setup and dispatch layer for classical and special-relativistic
//! hydrodynamics on structured 1D and 2D grids.
//!
//! This crate prepares everything a numerical integration engine needs and
//! interprets what it returns:
//! - Ideal-gas equations of state (Newtonian Euler and SRHD)
//! - Primitive to conserved conversion, including Lorentz factors
//! - Uniform and logarithmic cell-centre grids
//! - Two-state (Riemann) initial conditions
//! - Ghost-cell padding and stripping for outflow and periodic boundaries
//! - Dispatch to one of four engine entry points by dimensionality and regime
//! - JSON configuration and checkpoints
//!
//! Flux evaluation and time stepping live behind the
//! [`IntegrationEngine`](engine::IntegrationEngine) trait.

pub mod boundary;
pub mod engine;
pub mod equations;
pub mod error;
pub mod io;
pub mod mesh;
pub mod setup;
pub mod simulation;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use boundary::{GhostLayout, GhostZoneManager};
pub use engine::{EngineError, EngineInput, IntegrationEngine, SolverVariant};
pub use equations::{ConservedVariables, Euler, HydroSystem, IdealGas, RelativisticEuler};
pub use error::{ErrorKind, Result, SetupError};
pub use io::{read_checkpoint, write_checkpoint, Checkpoint};
pub use mesh::{build_grid, AxisSpacing, Geometry, Grid1D, GridGeometry};
pub use setup::{DiscontinuitySetup, InitialState, RiemannProblem};
pub use simulation::{Simulation, SimulationConfig, SimulationOutput, StartFrom};
pub use state::{
    ConservedField, ConservedState, ConservedStateBuilder, LorentzFactorField, PrimitiveState,
};
pub use types::{
    BoundaryMode, CoordinateSystem, Dimensionality, GridShape, Interval, Order, Regime,
    RiemannScheme, Spacing,
};
