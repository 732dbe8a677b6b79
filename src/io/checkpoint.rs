//! JSON checkpoints.
//!
//! A checkpoint stores the padded conserved field exactly as the engine saw
//! it, the Lorentz factors of relativistic runs and the simulation time:
//!
//! ```text
//! {
//!   "time": 0.25,
//!   "conserved": { "regime": "relativistic", "shape": {"one_d": 104},
//!                  "ghosts": {"x1": 2, "x2": 0}, "data": [...] },
//!   "lorentz":   { "shape": {"one_d": 104}, "ghosts": {...}, "data": [...] }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::EngineError;
use crate::state::{check_companion, ConservedField, LorentzFactorField};
use crate::types::Regime;

/// Saved simulation state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Simulation time of the saved state
    pub time: f64,
    pub conserved: ConservedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lorentz: Option<LorentzFactorField>,
}

impl Checkpoint {
    pub fn new(time: f64, conserved: ConservedField, lorentz: Option<LorentzFactorField>) -> Self {
        Self {
            time,
            conserved,
            lorentz,
        }
    }

    /// Check internal consistency of a decoded checkpoint.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |e: crate::SetupError| EngineError::InvalidCheckpoint(e.to_string());

        if !self.time.is_finite() {
            return Err(EngineError::InvalidCheckpoint(format!(
                "non-finite time {}",
                self.time
            )));
        }
        self.conserved.validate().map_err(invalid)?;
        if let Some(w) = &self.lorentz {
            if self.conserved.regime() != Regime::Relativistic {
                return Err(EngineError::InvalidCheckpoint(
                    "Lorentz factors stored for a classical field".into(),
                ));
            }
            w.validate().map_err(invalid)?;
            check_companion(&self.conserved, w).map_err(invalid)?;
        }
        Ok(())
    }
}

/// Write a checkpoint as JSON.
pub fn write_checkpoint(
    path: impl AsRef<Path>,
    checkpoint: &Checkpoint,
) -> Result<(), EngineError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, checkpoint)?;
    writer.flush()?;
    debug!(path = %path.display(), time = checkpoint.time, "wrote checkpoint");
    Ok(())
}

/// Read and validate a JSON checkpoint.
pub fn read_checkpoint(path: impl AsRef<Path>) -> Result<Checkpoint, EngineError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let checkpoint: Checkpoint = serde_json::from_reader(BufReader::new(file))?;
    checkpoint.validate()?;
    debug!(
        path = %path.display(),
        time = checkpoint.time,
        shape = %checkpoint.conserved.shape(),
        "read checkpoint"
    );
    Ok(checkpoint)
}
