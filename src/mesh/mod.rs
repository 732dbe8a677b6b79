//! Structured mesh coordinates.
//!
//! Provides the grid geometry handed to the integration engine:
//! - [`build_grid`] for a single axis (uniform or logarithmic)
//! - [`Grid1D`] with derived cell faces and widths
//! - [`GridGeometry`] composing one or two independently spaced axes

mod grid;

pub use grid::{build_grid, AxisSpacing, Geometry, Grid1D, GridGeometry};
