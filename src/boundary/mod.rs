//! Boundary handling through ghost cells.
//!
//! | Mode | Ghost cells | Who applies the boundary |
//! |------|-------------|--------------------------|
//! | `Outflow` | 1 (first order) or 2 (second order) per side | [`GhostZoneManager`] replicates the edge cell |
//! | `Periodic` | none | the integration engine wraps indices |

mod ghost;

pub use ghost::{GhostLayout, GhostZoneManager};

pub(crate) use ghost::pad_field;
