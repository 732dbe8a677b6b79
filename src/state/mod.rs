//! Field storage for primitive and conserved variables.
//!
//! - [`PrimitiveState`]: ρ, p and velocity components over a grid
//! - [`ConservedField`]: `(n_vars, …spatial…)` conserved variables with ghost metadata
//! - [`LorentzFactorField`]: per-cell W accompanying relativistic fields
//! - [`ConservedStateBuilder`]: primitive to conserved conversion for one regime
//!
//! With the `parallel` feature, per-cell conversions run on the rayon pool.

mod builder;
mod conserved;
mod primitive;

pub use builder::{ConservedState, ConservedStateBuilder};
pub use conserved::{ConservedField, LorentzFactorField};
pub use primitive::PrimitiveState;

pub(crate) use conserved::check_companion;

use crate::error::Result;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Apply a fallible per-cell conversion to cells `0..n`, stopping at the first
/// failing cell.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_cells<T, F>(n: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    (0..n).map(f).collect()
}

/// Apply a fallible per-cell conversion to cells `0..n` in parallel.
///
/// Every cell is converted and the error of the lowest failing cell is
/// returned, matching the sequential path.
#[cfg(feature = "parallel")]
pub(crate) fn map_cells<T, F>(n: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    let results: Vec<Result<T>> = (0..n).into_par_iter().map(f).collect();
    results.into_iter().collect()
}
