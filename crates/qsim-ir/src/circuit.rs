//! Circuits: ordered, validated gate sequences with derived metrics.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Error rate assumed for gates that carry none.
pub const DEFAULT_GATE_ERROR_RATE: f64 = 0.01;

/// Largest register a validated circuit may declare.
pub const MAX_QUBITS: u32 = 24;

/// Metrics derived from a circuit's gate list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitMetrics {
    /// Number of sequential layers.
    pub depth: usize,
    /// Product of per-gate success probabilities.
    pub fidelity: f64,
    /// Mean per-gate error rate.
    pub noise: f64,
}

impl CircuitMetrics {
    /// Compute metrics for `gates` on a register of `num_qubits`.
    pub fn compute(num_qubits: u32, gates: &[Gate]) -> Self {
        let (_, depth) = layer_assignment(num_qubits, gates);

        let mut fidelity = 1.0;
        let mut total_error = 0.0;
        for gate in gates {
            let rate = gate.effective_error_rate(DEFAULT_GATE_ERROR_RATE);
            fidelity *= 1.0 - rate;
            total_error += rate;
        }

        let noise = if gates.is_empty() {
            0.0
        } else {
            total_error / gates.len() as f64
        };

        Self {
            depth,
            fidelity,
            noise,
        }
    }
}

impl Default for CircuitMetrics {
    fn default() -> Self {
        Self {
            depth: 0,
            fidelity: 1.0,
            noise: 0.0,
        }
    }
}

/// Greedy ASAP layering.
///
/// Returns the layer of every gate (in program order) and the resulting
/// depth. A gate lands one layer after the latest gate that touched any of
/// its operands, so operand-disjoint gates share layers and gates on a
/// common qubit keep their order.
pub fn layer_assignment(num_qubits: u32, gates: &[Gate]) -> (Vec<usize>, usize) {
    // Only wires some gate touches need a slot.
    let width = gates
        .iter()
        .flat_map(|g| g.qubits())
        .map(|q| q.index() + 1)
        .max()
        .unwrap_or(0)
        .min(num_qubits as usize);
    let mut last_layer: Vec<Option<usize>> = vec![None; width];
    let mut layers = Vec::with_capacity(gates.len());
    let mut depth = 0;

    for gate in gates {
        let layer = gate
            .qubits()
            .filter_map(|q| last_layer.get(q.index()).copied().flatten())
            .map(|l| l + 1)
            .max()
            .unwrap_or(0);

        for q in gate.qubits() {
            if let Some(slot) = last_layer.get_mut(q.index()) {
                *slot = Some(layer);
            }
        }

        depth = depth.max(layer + 1);
        layers.push(layer);
    }

    (layers, depth)
}

/// A quantum circuit over a fixed number of qubits.
///
/// Gates are validated on insertion and metrics are recomputed after every
/// change, so [`Circuit::metrics`] is always consistent with
/// [`Circuit::gates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitRepr", into = "CircuitRepr")]
pub struct Circuit {
    num_qubits: u32,
    gates: Vec<Gate>,
    metrics: CircuitMetrics,
}

/// Wire format; metrics are derived, never trusted from input.
#[derive(Serialize, Deserialize)]
struct CircuitRepr {
    num_qubits: u32,
    #[serde(default)]
    gates: Vec<Gate>,
}

impl TryFrom<CircuitRepr> for Circuit {
    type Error = IrError;

    fn try_from(repr: CircuitRepr) -> Result<Self, Self::Error> {
        Circuit::from_gates(repr.num_qubits, repr.gates)
    }
}

impl From<Circuit> for CircuitRepr {
    fn from(circuit: Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits,
            gates: circuit.gates,
        }
    }
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            gates: vec![],
            metrics: CircuitMetrics::default(),
        }
    }

    /// Build a circuit from a gate list, validating the register size and
    /// every gate.
    pub fn from_gates(num_qubits: u32, gates: Vec<Gate>) -> IrResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(IrError::RegisterTooLarge {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        for gate in &gates {
            gate.validate(num_qubits)?;
        }
        let metrics = CircuitMetrics::compute(num_qubits, &gates);
        Ok(Self {
            num_qubits,
            gates,
            metrics,
        })
    }

    /// Validate and append a gate.
    pub fn add_gate(&mut self, gate: Gate) -> IrResult<&mut Self> {
        gate.validate(self.num_qubits)?;
        self.gates.push(gate);
        self.metrics = CircuitMetrics::compute(self.num_qubits, &self.gates);
        Ok(self)
    }

    // =========================================================================
    // Builder helpers
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::h(qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::x(qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::y(qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::z(qubit))
    }

    /// Apply CNOT gate.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::cnot(control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::swap(a, b))
    }

    /// Apply Toffoli gate.
    pub fn toffoli(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Gate::toffoli(c1, c2, target))
    }

    /// Apply rotation U(θ, φ, λ).
    pub fn rot(&mut self, qubit: QubitId, theta: f64, phi: f64, lambda: f64) -> IrResult<&mut Self> {
        self.add_gate(Gate::rot(qubit, theta, phi, lambda))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The gates, in program order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get the number of gates.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Current metrics.
    pub fn metrics(&self) -> CircuitMetrics {
        self.metrics
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.metrics.depth
    }

    /// Product of per-gate success probabilities.
    pub fn fidelity(&self) -> f64 {
        self.metrics.fidelity
    }

    /// Mean per-gate error rate.
    pub fn noise(&self) -> f64 {
        self.metrics.noise
    }

    /// Layer of every gate under ASAP scheduling.
    pub fn layers(&self) -> Vec<usize> {
        layer_assignment(self.num_qubits, &self.gates).0
    }

    /// Number of gates touching each qubit.
    pub fn gates_per_qubit(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_qubits as usize];
        for gate in &self.gates {
            for q in gate.qubits() {
                counts[q.index()] += 1;
            }
        }
        counts
    }

    /// Consume the circuit and return its gates.
    pub fn into_gates(self) -> Vec<Gate> {
        self.gates
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON, re-validating every gate.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2);
        circuit.h(QubitId(0))?.cnot(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new(n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cnot(QubitId(i), QubitId(i + 1))?;
        }

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_empty_circuit_metrics() {
        let circuit = Circuit::new(3);
        assert_eq!(circuit.depth(), 0);
        assert_eq!(circuit.fidelity(), 1.0);
        assert_eq!(circuit.noise(), 0.0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_depth_parallel_and_serial() {
        let mut parallel = Circuit::new(2);
        parallel.h(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
        assert_eq!(parallel.depth(), 1);

        let mut serial = Circuit::new(2);
        serial.h(QubitId(0)).unwrap().x(QubitId(0)).unwrap();
        assert_eq!(serial.depth(), 2);
    }

    #[test]
    fn test_depth_multi_qubit() {
        let mut circuit = Circuit::new(3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .x(QubitId(2))
            .unwrap()
            .toffoli(QubitId(0), QubitId(1), QubitId(2))
            .unwrap();

        assert_eq!(circuit.layers(), vec![0, 1, 0, 2]);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_fidelity_and_noise() {
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Gate::h(QubitId(0)).with_error_rate(0.1)).unwrap();
        circuit.add_gate(Gate::x(QubitId(1))).unwrap();

        let expected_fidelity = 0.9 * (1.0 - DEFAULT_GATE_ERROR_RATE);
        assert!((circuit.fidelity() - expected_fidelity).abs() < 1e-12);
        assert!((circuit.noise() - (0.1 + DEFAULT_GATE_ERROR_RATE) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fidelity_never_increases() {
        let mut circuit = Circuit::new(1);
        let mut previous = circuit.fidelity();
        for rate in [0.0, 0.05, 0.2, 0.0, 0.5] {
            circuit
                .add_gate(Gate::z(QubitId(0)).with_error_rate(rate))
                .unwrap();
            assert!(circuit.fidelity() <= previous);
            previous = circuit.fidelity();
        }
    }

    #[test]
    fn test_invalid_gate_leaves_circuit_untouched() {
        let mut circuit = Circuit::new(2);
        circuit.h(QubitId(0)).unwrap();
        let before = circuit.clone();

        let result = circuit.cnot(QubitId(0), QubitId(2));
        assert!(matches!(result, Err(IrError::InvalidGateSpec { .. })));
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_gates_per_qubit() {
        let mut circuit = Circuit::new(3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .rot(QubitId(2), PI / 2.0, 0.0, 0.0)
            .unwrap();
        assert_eq!(circuit.gates_per_qubit(), vec![2, 1, 1]);
    }

    #[test]
    fn test_json_roundtrip_revalidates() {
        let circuit = Circuit::ghz(3).unwrap();
        let json = circuit.to_json().unwrap();
        let back = Circuit::from_json(&json).unwrap();
        assert_eq!(back, circuit);
        assert_eq!(back.depth(), 3);

        let bad = r#"{"num_qubits":1,"gates":[{"kind":"CNOT","target":0,"controls":[1]}]}"#;
        assert!(Circuit::from_json(bad).is_err());
    }

    #[test]
    fn test_oversized_register_rejected() {
        let json = r#"{"num_qubits":4000000000,"gates":[]}"#;
        assert!(matches!(
            Circuit::from_json(json),
            Err(IrError::Serialization(_))
        ));

        let result = Circuit::from_gates(MAX_QUBITS + 1, vec![]);
        assert!(matches!(
            result,
            Err(IrError::RegisterTooLarge { requested, max: MAX_QUBITS }) if requested == MAX_QUBITS + 1
        ));

        assert!(Circuit::from_gates(MAX_QUBITS, vec![Gate::h(QubitId(MAX_QUBITS - 1))]).is_ok());
    }

    #[test]
    fn test_layering_sized_by_touched_wires() {
        let mut circuit = Circuit::new(u32::MAX);
        circuit.h(QubitId(0)).unwrap().cnot(QubitId(0), QubitId(3)).unwrap();
        assert_eq!(circuit.depth(), 2);

        let (layers, depth) = layer_assignment(u32::MAX, &[]);
        assert!(layers.is_empty());
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_bell_and_ghz() {
        let bell = Circuit::bell().unwrap();
        assert_eq!(bell.gate_count(), 2);
        assert_eq!(bell.depth(), 2);

        let ghz = Circuit::ghz(5).unwrap();
        assert_eq!(ghz.num_qubits(), 5);
        assert_eq!(ghz.gate_count(), 5);

        assert!(Circuit::ghz(0).unwrap().is_empty());
    }
}
