//! Error types for the zeta geometry core.
//!
//! All crates return `ZetaResult<T>` from fallible operations. Indexed
//! accessors never return errors; they have separate checked variants
//! that return `Option`.

use thiserror::Error;

/// Unified error type for the zeta crates.
#[derive(Debug, Error)]
pub enum ZetaError {
    /// I/O operation failed (missing file, truncated stream, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data does not match the element type it is being read as.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A per-set selection mask has the wrong length.
    #[error("Invalid mask: expected {expected} entries, found {found}")]
    InvalidMask { expected: usize, found: usize },

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, ZetaError>`.
pub type ZetaResult<T> = Result<T, ZetaError>;
