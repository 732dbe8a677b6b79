//! Errors reported by integration engines.

use thiserror::Error;

/// Failure inside the integration engine or while reading its checkpoints.
///
/// The dispatcher wraps these in [`SetupError::Engine`](crate::SetupError::Engine)
/// without altering them.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Time stepping or an internal solve failed to converge.
    #[error("integration failed to converge: {0}")]
    NonConvergence(String),

    /// A NaN or infinity appeared in the evolved state.
    #[error("non-finite value in evolved field at cell {cell}")]
    NonFinite { cell: usize },

    /// The engine returned a field that does not match its input.
    #[error("engine returned {actual}, expected {expected}")]
    ShapeMismatch { expected: String, actual: String },

    /// Checkpoint file could not be read or written.
    #[error("checkpoint I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Checkpoint file is not valid JSON for a checkpoint.
    #[error("failed to decode checkpoint: {0}")]
    Decode(#[from] serde_json::Error),

    /// Checkpoint decoded but its contents are inconsistent.
    #[error("invalid checkpoint: {0}")]
    InvalidCheckpoint(String),
}
