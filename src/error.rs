// src/error.rs
use thiserror::Error;

/// Narrow error taxonomy for the numerical core (spec §7).
///
/// Degenerate geometry and zero-total-inverse-mass cases are not errors:
/// they are skipped neutrally inside the per-step hot path so a step always
/// completes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("object index {index} out of range (have {len} objects)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
