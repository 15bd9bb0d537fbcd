//! Error types for the simulation core.
//!
//! The simulation itself has no failure surface; errors only arise at the
//! edges where brains and parameters are read from or written to disk, or
//! where loaded values fail validation.

use thiserror::Error;

/// Main error type for simulation I/O and validation.
#[derive(Error, Debug)]
pub enum SimError {
    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A network whose levels do not chain together
    #[error("Invalid network topology: {0}")]
    Topology(String),

    /// Parameters outside the range the simulation can run with
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new topology error.
    #[must_use]
    pub fn topology<S: Into<String>>(msg: S) -> Self {
        Self::Topology(msg.into())
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }
}
