//! Simulation setup and dispatch.
//!
//! This module ties together:
//! - [`SimulationConfig`]: options of one run, loadable from JSON
//! - [`Simulation`]: build, pad, dispatch to an [`IntegrationEngine`](crate::engine::IntegrationEngine), strip
//! - [`StartFrom`]: fresh initial data, an in-memory state or a checkpoint
//!
//! # Example
//! ```ignore
//! use rhd_rs::setup::RiemannProblem;
//! use rhd_rs::simulation::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::load("sod.json")?;
//! let output = Simulation::new(my_engine, config).run(RiemannProblem::sod())?;
//! let primitives = output.primitives()?;
//! ```

mod config;
mod runner;

pub use config::SimulationConfig;
pub use runner::{Simulation, SimulationOutput, StartFrom};
