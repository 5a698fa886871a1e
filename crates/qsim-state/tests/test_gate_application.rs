//! Integration tests for gate application and measurement statistics.

use proptest::prelude::*;
use qsim_ir::{Gate, QubitId};
use qsim_state::{GateLibrary, QuantumState, StateError};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Measurement statistics
// ---------------------------------------------------------------------------

#[test]
fn hadamard_measurement_is_balanced() {
    let mut rng = StdRng::seed_from_u64(2024);
    let prepared =
        GateLibrary::apply(&Gate::h(QubitId(0)), &QuantumState::new(1).unwrap()).unwrap();

    let trials = 200;
    let ones = (0..trials)
        .filter(|_| prepared.clone().measure(&mut rng) == 1)
        .count();

    let freq = ones as f64 / trials as f64;
    assert!((0.3..=0.7).contains(&freq), "frequency of |1⟩ was {freq}");
}

#[test]
fn seeded_measurement_is_reproducible() {
    let prepared = (0..3).fold(QuantumState::new(3).unwrap(), |s, q| {
        GateLibrary::apply(&Gate::h(QubitId(q)), &s).unwrap()
    });

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20)
            .map(|_| prepared.clone().measure(&mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn ghz_single_qubit_measurements_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..30 {
        let mut state = QuantumState::new(3).unwrap();
        state = GateLibrary::apply(&Gate::h(QubitId(0)), &state).unwrap();
        state = GateLibrary::apply(&Gate::cnot(QubitId(0), QubitId(1)), &state).unwrap();
        state = GateLibrary::apply(&Gate::cnot(QubitId(1), QubitId(2)), &state).unwrap();

        let bits: Vec<u8> = (0..3)
            .map(|q| state.measure_qubit(QubitId(q), &mut rng).unwrap())
            .collect();
        assert!(bits.iter().all(|&b| b == bits[0]));
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn toffoli_needs_two_distinct_controls() {
    let state = QuantumState::new(3).unwrap();
    let gate = Gate::toffoli(QubitId(0), QubitId(2), QubitId(2));
    assert!(matches!(
        GateLibrary::apply(&gate, &state),
        Err(StateError::Ir(_))
    ));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_gate(n: u32) -> impl Strategy<Value = Gate> {
    prop_oneof![
        (0..n).prop_map(|q| Gate::h(QubitId(q))),
        (0..n).prop_map(|q| Gate::y(QubitId(q))),
        (0..n, -3.2..3.2f64, -3.2..3.2f64, -3.2..3.2f64)
            .prop_map(|(q, t, p, l)| Gate::rot(QubitId(q), t, p, l)),
        (0..n, 1..n).prop_map(move |(c, off)| Gate::cnot(QubitId(c), QubitId((c + off) % n))),
        (0..n, 1..n).prop_map(move |(a, off)| Gate::swap(QubitId(a), QubitId((a + off) % n))),
    ]
}

proptest! {
    #[test]
    fn gate_application_preserves_normalization(gates in prop::collection::vec(arb_gate(4), 1..30)) {
        let mut state = QuantumState::new(4).unwrap();
        for gate in &gates {
            state = GateLibrary::apply(gate, &state).unwrap();
        }
        prop_assert!(state.is_normalized());
    }

    #[test]
    fn tensor_product_preserves_normalization(
        a in prop::collection::vec(arb_gate(2), 0..8),
        b in prop::collection::vec(arb_gate(2), 0..8),
    ) {
        let left = a.iter().fold(QuantumState::new(2).unwrap(), |s, g| GateLibrary::apply(g, &s).unwrap());
        let right = b.iter().fold(QuantumState::new(2).unwrap(), |s, g| GateLibrary::apply(g, &s).unwrap());
        let joint = left.tensor_product(&right).unwrap();
        prop_assert_eq!(joint.num_qubits(), 4);
        prop_assert!(joint.is_normalized());
    }
}
