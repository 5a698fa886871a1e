//! Error types for the compilation crate.

use qsim_ir::IrError;
use thiserror::Error;

/// Errors raised while running optimization passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A pass produced a gate list the circuit rejected.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// A pass could not complete.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Name of the failing pass.
        name: String,
        /// Why it failed.
        reason: String,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
