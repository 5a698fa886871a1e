//! qsim State-Vector Engine
//!
//! This crate holds the numerical core of the simulator: the joint
//! amplitude vector of an n-qubit register and the fixed gate library that
//! acts on it. Exact simulation is limited to [`MAX_QUBITS`] qubits.
//!
//! # Features
//!
//! - **Exact state vector**: `2^n` complex amplitudes, normalized after
//!   every operation
//! - **Pure gate application**: [`GateLibrary::apply`] returns a new state
//!   and only touches the operand sub-space of each block
//! - **Injected randomness**: measurement takes any `rand::Rng`, so seeded
//!   generators give reproducible outcomes
//! - **Diagnostics**: reduced density matrices and an [`EntanglementMap`]
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//!
//! # Example
//!
//! ```rust
//! use qsim_ir::{Gate, QubitId};
//! use qsim_state::{GateLibrary, QuantumState};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let state = QuantumState::new(2).unwrap();
//! let state = GateLibrary::apply(&Gate::h(QubitId(0)), &state).unwrap();
//! let mut state = GateLibrary::apply(&Gate::cnot(QubitId(0), QubitId(1)), &state).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let outcome = state.measure(&mut rng);
//! assert!(outcome == 0b00 || outcome == 0b11);
//! ```

pub mod complex;
pub mod entanglement;
pub mod error;
pub mod library;
pub mod state;

pub use complex::Complex;
pub use entanglement::EntanglementMap;
pub use error::{StateError, StateResult};
pub use library::GateLibrary;
pub use state::{MAX_QUBITS, NORMALIZATION_TOLERANCE, QuantumState};
