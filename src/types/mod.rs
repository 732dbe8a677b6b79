//! Strongly-typed domain types for safer APIs.
//!
//! - [`Interval`]: coordinate bounds of one axis
//! - [`GridShape`]: cell counts of a 1D or 2D structured grid
//! - Option enums ([`Regime`], [`Order`], [`BoundaryMode`], ...) that replace
//!   the boolean flags a driver would otherwise thread through every call
//!
//! # Example
//!
//! ```
//! use rhd_rs::types::{GridShape, Interval, Order, Spacing};
//!
//! let bounds = Interval::new(0.05, 1.0).unwrap();
//! let shape = GridShape::one_d(128).unwrap();
//!
//! assert_eq!(Order::Second.ghost_width(), 2);
//! assert_eq!("logspace".parse::<Spacing>().unwrap(), Spacing::Logarithmic);
//! assert_eq!(shape.n_cells(), 128);
//! assert!(bounds.is_positive());
//! ```

mod bounds;
mod options;
mod resolution;

pub use bounds::Interval;
pub use options::{
    BoundaryMode, CoordinateSystem, Dimensionality, Order, Regime, RiemannScheme, Spacing,
};
pub use resolution::GridShape;
