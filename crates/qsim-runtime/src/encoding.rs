//! Feature encoding.
//!
//! [`FeatureEncoder::enhance`] is the entry point used by feature
//! preprocessors: a real vector is amplitude-encoded, pushed through a
//! fixed shallow circuit, and read back as amplitude magnitudes. The
//! transform is deterministic and lossy. It makes no speedup claim.

use qsim_ir::{Circuit, QubitId};
use qsim_state::{GateLibrary, QuantumState};
use tracing::{debug, instrument};

use crate::error::RuntimeResult;

/// Synthetic "acceleration" ratio `2^n / (n · max(depth, 1))`.
///
/// A presentation-only number kept for compatibility with existing
/// dashboards. It is not a measured speedup. Returns 0 for an empty
/// register.
pub fn acceleration_factor(num_qubits: u32, depth: usize) -> f64 {
    if num_qubits == 0 {
        return 0.0;
    }
    let n = f64::from(num_qubits);
    n.exp2() / (n * depth.max(1) as f64)
}

/// Qubits needed to amplitude-encode `len` values, at least 1.
pub fn qubits_for_len(len: usize) -> u32 {
    len.next_power_of_two().trailing_zeros().max(1)
}

/// Encodes feature vectors through a fixed Hadamard (and optionally CNOT)
/// layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureEncoder {
    entangle: bool,
}

impl FeatureEncoder {
    /// Encoder with a Hadamard layer only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or remove) the CNOT chain `q_i → q_{i+1}` after the Hadamard
    /// layer.
    #[must_use]
    pub fn with_entanglement(mut self, entangle: bool) -> Self {
        self.entangle = entangle;
        self
    }

    /// Check if the entangling layer is enabled.
    pub fn entangles(&self) -> bool {
        self.entangle
    }

    /// The fixed circuit applied to an `num_qubits`-qubit encoding.
    pub fn circuit(&self, num_qubits: u32) -> RuntimeResult<Circuit> {
        let mut circuit = Circuit::new(num_qubits);
        for q in 0..num_qubits {
            circuit.h(QubitId(q))?;
        }
        if self.entangle {
            for q in 1..num_qubits {
                circuit.cnot(QubitId(q - 1), QubitId(q))?;
            }
        }
        Ok(circuit)
    }

    /// Transform `features` into a vector of the same length.
    ///
    /// Empty input gives empty output. An all-zero vector cannot be
    /// normalized and fails with a normalization error.
    #[instrument(skip_all, fields(len = features.len(), entangle = self.entangle))]
    pub fn enhance(&self, features: &[f64]) -> RuntimeResult<Vec<f64>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let mut state = QuantumState::from_real_vector(features)?;
        let circuit = self.circuit(state.num_qubits() as u32)?;
        for gate in circuit.gates() {
            state = GateLibrary::apply(gate, &state)?;
        }
        debug!(
            "Encoded {} features on {} qubits, depth {}",
            features.len(),
            state.num_qubits(),
            circuit.depth()
        );

        Ok(state
            .amplitudes()
            .iter()
            .take(features.len())
            .map(|a| a.norm())
            .collect())
    }
}
