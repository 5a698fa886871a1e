//! Property-based tests for circuit layering and metrics.

use proptest::prelude::*;
use qsim_ir::{Circuit, Gate, QubitId};

const NUM_QUBITS: u32 = 4;

/// Generate a gate that is valid on a `NUM_QUBITS` register.
fn arb_gate() -> impl Strategy<Value = Gate> {
    let q = 0..NUM_QUBITS;
    prop_oneof![
        q.clone().prop_map(|t| Gate::h(QubitId(t))),
        q.clone().prop_map(|t| Gate::x(QubitId(t))),
        q.clone().prop_map(|t| Gate::z(QubitId(t))),
        (q.clone(), 1..NUM_QUBITS)
            .prop_map(|(c, off)| Gate::cnot(QubitId(c), QubitId((c + off) % NUM_QUBITS))),
        (q, 0.0..0.3f64).prop_map(|(t, e)| Gate::y(QubitId(t)).with_error_rate(e)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    prop::collection::vec(arb_gate(), 0..=24)
        .prop_map(|gates| Circuit::from_gates(NUM_QUBITS, gates).unwrap())
}

proptest! {
    #[test]
    fn depth_bounded_by_gate_count_and_wire_load(circuit in arb_circuit()) {
        let busiest = circuit.gates_per_qubit().into_iter().max().unwrap_or(0);
        prop_assert!(circuit.depth() <= circuit.gate_count());
        prop_assert!(circuit.depth() >= busiest);
    }

    #[test]
    fn gates_sharing_a_qubit_land_in_increasing_layers(circuit in arb_circuit()) {
        let layers = circuit.layers();
        let gates = circuit.gates();
        for i in 0..gates.len() {
            for j in (i + 1)..gates.len() {
                let shares = gates[i].qubits().any(|q| gates[j].acts_on(q));
                if shares {
                    prop_assert!(layers[i] < layers[j]);
                }
            }
        }
    }

    #[test]
    fn noise_is_mean_error_rate(circuit in arb_circuit()) {
        let rates: Vec<f64> = circuit
            .gates()
            .iter()
            .map(|g| g.effective_error_rate(qsim_ir::DEFAULT_GATE_ERROR_RATE))
            .collect();
        let expected = if rates.is_empty() {
            0.0
        } else {
            rates.iter().sum::<f64>() / rates.len() as f64
        };
        prop_assert!((circuit.noise() - expected).abs() < 1e-12);
        prop_assert!(circuit.fidelity() <= 1.0 && circuit.fidelity() >= 0.0);
    }
}
