//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur when building gates and circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate operands or parameters are malformed for the target register.
    #[error("Invalid gate spec for '{gate_name}': {reason}")]
    InvalidGateSpec {
        /// Name of the offending gate.
        gate_name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The circuit declares more qubits than any register supports.
    #[error("Register of {requested} qubits exceeds the limit of {max}")]
    RegisterTooLarge {
        /// Declared register size.
        requested: u32,
        /// Largest supported register.
        max: u32,
    },

    /// Circuit (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IrError {
    /// Shorthand for an [`IrError::InvalidGateSpec`].
    pub fn invalid_gate(gate_name: impl Into<String>, reason: impl Into<String>) -> Self {
        IrError::InvalidGateSpec {
            gate_name: gate_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
