//! Error types for the runtime crate.

use qsim_compile::CompileError;
use qsim_ir::IrError;
use qsim_state::StateError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur in processor operations.
///
/// Every variant is raised before any state is touched: a rejected call
/// leaves the state vector, circuit and histories exactly as they were.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuntimeError {
    /// The processor is not in the `Initialized` state.
    #[error("Processor not initialized: {0}")]
    NotInitialized(String),

    /// Unknown measurement basis name.
    #[error("Unsupported measurement basis '{0}', expected computational, hadamard or phase")]
    MeasurementBasisError(String),

    /// The operation exceeds what the backend supports.
    #[error("Backend capability exceeded: {0}")]
    BackendCapabilityError(String),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// State-vector error (dimension, index or normalization).
    #[error(transparent)]
    State(#[from] StateError),

    /// Malformed gate.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Optimization failed.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl RuntimeError {
    /// Check if this error reports a gate the backend refuses.
    pub fn is_capability_error(&self) -> bool {
        matches!(self, RuntimeError::BackendCapabilityError(_))
    }

    /// Check if this error reports a malformed gate.
    pub fn is_invalid_gate(&self) -> bool {
        matches!(
            self,
            RuntimeError::Ir(IrError::InvalidGateSpec { .. })
                | RuntimeError::State(StateError::Ir(IrError::InvalidGateSpec { .. }))
        )
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
