//! Built-in optimization passes.
//!
//! - [`CancelSelfInverse`]: removes adjacent pairs of self-inverse
//!   single-qubit gates
//! - [`DepthScheduling`]: reorders gates so operand-disjoint gates share
//!   layers

pub mod cancel;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use cancel::CancelSelfInverse;
pub use schedule::DepthScheduling;
