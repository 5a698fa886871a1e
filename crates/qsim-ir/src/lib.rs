//! qsim Circuit Representation
//!
//! This crate provides the gate and circuit types shared by every other
//! qsim crate: the state-vector simulator applies [`Gate`]s, the optimizer
//! rewrites [`Circuit`]s, and the processor records what it executed.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], where qubit `k` is bit `k` of a basis index
//! - **Gates**: [`Gate`] over the fixed [`GateKind`] library, with optional
//!   [`RotationParams`] and a per-gate error rate
//! - **Circuit**: [`Circuit`], an ordered gate list validated on insertion,
//!   with [`CircuitMetrics`] (depth, fidelity, noise) kept up to date
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cnot(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.gate_count(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `ROT` | 1 | Rotation U(θ, φ, λ) |
//! | `CNOT` | 2 | Controlled-NOT |
//! | `SWAP` | 2 | SWAP gate |
//! | `TOFFOLI` | 3 | Toffoli (CCNOT) gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

pub use circuit::{Circuit, CircuitMetrics, DEFAULT_GATE_ERROR_RATE, MAX_QUBITS, layer_assignment};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, RotationParams};
pub use qubit::QubitId;
