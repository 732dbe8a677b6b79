//! I/O for saved simulation state.
//!
//! - **Checkpoints**: JSON snapshots of a padded conserved field (and its
//!   Lorentz factors) that a run can resume from
//!
//! # Example
//!
//! ```no_run
//! use rhd_rs::io::{read_checkpoint, write_checkpoint, Checkpoint};
//! use rhd_rs::state::ConservedField;
//! use rhd_rs::types::{GridShape, Regime};
//!
//! let field = ConservedField::zeros(Regime::Classical, GridShape::one_d(64).unwrap());
//! write_checkpoint("state.json", &Checkpoint::new(0.0, field, None)).unwrap();
//!
//! let restored = read_checkpoint("state.json").unwrap();
//! assert_eq!(restored.time, 0.0);
//! ```

mod checkpoint;

pub use checkpoint::{read_checkpoint, write_checkpoint, Checkpoint};
