//! Error types for the drape simulator.
//!
//! All crates return `DrapeResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the drape simulator.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// A grid coordinate fell outside `[0, resolution)` on either axis.
    #[error("Grid coordinate ({x}, {y}) out of range for a {resolution_x}x{resolution_y} cloth")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        resolution_x: usize,
        resolution_y: usize,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A collision proxy named a primitive the simulator does not know.
    #[error("Unknown collision primitive: {0}")]
    UnknownPrimitive(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g., per-point buffers out of sync).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;
