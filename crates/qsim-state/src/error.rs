//! Error types for the state crate.

use qsim_ir::IrError;
use thiserror::Error;

/// Errors produced by state construction, access, and gate application.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    /// Requested register size or vector length is unusable.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Amplitude or qubit index outside the register.
    #[error("Index {index} out of range (bound {bound})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Exclusive upper bound.
        bound: usize,
    },

    /// The vector cannot be (or is not) normalized.
    #[error("Normalization error: {0}")]
    NormalizationError(String),

    /// The gate is malformed for this register.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;
