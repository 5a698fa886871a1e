//! Property tests: rejected operations never change a processor, accepted
//! ones keep the state normalized.

use proptest::prelude::*;
use qsim_ir::{Gate, GateKind, QubitId, RotationParams};
use qsim_runtime::{BackendDescriptor, Processor, ProcessorConfig};

const NUM_QUBITS: u32 = 3;

/// Gates with operands drawn past the register end, so some are invalid.
fn arb_gate() -> impl Strategy<Value = Gate> {
    (
        prop::sample::select(GateKind::ALL.to_vec()),
        0..NUM_QUBITS + 2,
        0..NUM_QUBITS + 2,
        0..NUM_QUBITS + 2,
        -3.2..3.2f64,
    )
        .prop_map(|(kind, t, c1, c2, angle)| {
            let controls = [c1, c2]
                .into_iter()
                .take(kind.num_controls())
                .map(QubitId)
                .collect();
            Gate {
                kind,
                target: QubitId(t),
                controls,
                params: kind
                    .is_parameterized()
                    .then(|| RotationParams::new(angle, angle / 2.0, -angle)),
                error_rate: None,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rejected_gates_leave_processor_untouched(gates in prop::collection::vec(arb_gate(), 1..25)) {
        let mut p = Processor::new(
            BackendDescriptor::simulator(NUM_QUBITS),
            ProcessorConfig::default().with_error_correction(true).with_seed(0),
        );
        p.initialize().unwrap();

        for gate in gates {
            let state = p.state().unwrap().clone();
            let circuit = p.circuit().clone();
            let events = p.error_history().len();
            let coherence = p.coherence().to_vec();

            match p.apply_gate(gate) {
                Ok(()) => {
                    prop_assert!(p.state().unwrap().is_normalized());
                    prop_assert_eq!(p.circuit().gate_count(), circuit.gate_count() + 1);
                }
                Err(_) => {
                    prop_assert_eq!(p.state().unwrap(), &state);
                    prop_assert_eq!(p.circuit(), &circuit);
                    prop_assert_eq!(p.error_history().len(), events);
                    prop_assert_eq!(p.coherence(), coherence.as_slice());
                }
            }
        }
    }
}
