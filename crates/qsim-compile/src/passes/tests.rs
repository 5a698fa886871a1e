//! Tests for optimization passes.

use qsim_ir::{Circuit, Gate, GateKind, QubitId};

use crate::pass::Pass;
use crate::property::{CancellationStats, PropertySet};

use super::{CancelSelfInverse, DepthScheduling};

fn run_cancel(circuit: &mut Circuit) -> usize {
    let mut props = PropertySet::new();
    CancelSelfInverse::new().run(circuit, &mut props).unwrap();
    props.get::<CancellationStats>().map_or(0, |s| s.removed)
}

#[test]
fn test_cancel_hh() {
    let mut circuit = Circuit::new(1);
    circuit.h(QubitId(0)).unwrap().h(QubitId(0)).unwrap();

    assert_eq!(run_cancel(&mut circuit), 2);
    assert!(circuit.is_empty());
}

#[test]
fn test_cancel_cascade() {
    let mut circuit = Circuit::new(1);
    circuit
        .h(QubitId(0))
        .unwrap()
        .x(QubitId(0))
        .unwrap()
        .x(QubitId(0))
        .unwrap()
        .h(QubitId(0))
        .unwrap();

    assert_eq!(run_cancel(&mut circuit), 4);
    assert!(circuit.is_empty());
    assert_eq!(circuit.depth(), 0);
}

#[test]
fn test_cancel_keeps_distinct_kinds() {
    let mut circuit = Circuit::new(2);
    circuit
        .h(QubitId(0))
        .unwrap()
        .x(QubitId(1))
        .unwrap()
        .cnot(QubitId(0), QubitId(1))
        .unwrap();

    assert_eq!(run_cancel(&mut circuit), 0);
    assert_eq!(circuit.gate_count(), 3);
}

#[test]
fn test_cancel_blocked_by_multi_qubit_gate() {
    let mut circuit = Circuit::new(2);
    circuit
        .x(QubitId(0))
        .unwrap()
        .cnot(QubitId(0), QubitId(1))
        .unwrap()
        .x(QubitId(0))
        .unwrap();

    assert_eq!(run_cancel(&mut circuit), 0);
    assert_eq!(circuit.gate_count(), 3);
}

#[test]
fn test_cancel_across_other_qubits() {
    // Gates on q1 do not separate the Z pair on q0.
    let mut circuit = Circuit::new(2);
    circuit
        .z(QubitId(0))
        .unwrap()
        .h(QubitId(1))
        .unwrap()
        .z(QubitId(0))
        .unwrap();

    assert_eq!(run_cancel(&mut circuit), 2);
    assert_eq!(circuit.gate_count(), 1);
    assert_eq!(circuit.gates()[0].kind, GateKind::H);
}

#[test]
fn test_rotation_never_cancels() {
    let mut circuit = Circuit::new(1);
    circuit
        .rot(QubitId(0), 0.3, 0.0, 0.0)
        .unwrap()
        .rot(QubitId(0), 0.3, 0.0, 0.0)
        .unwrap();

    assert_eq!(run_cancel(&mut circuit), 0);
    assert_eq!(circuit.gate_count(), 2);
}

#[test]
fn test_cancel_accumulates_stats() {
    let mut props = PropertySet::new();
    props.insert(CancellationStats { removed: 2 });

    let mut circuit = Circuit::new(1);
    circuit.y(QubitId(0)).unwrap().y(QubitId(0)).unwrap();
    CancelSelfInverse::new().run(&mut circuit, &mut props).unwrap();

    assert_eq!(props.get::<CancellationStats>().unwrap().removed, 4);
}

#[test]
fn test_schedule_packs_disjoint_gates() {
    // H0 Z0 X1: X1 belongs in layer 0 and moves ahead of Z0.
    let mut circuit = Circuit::from_gates(
        2,
        vec![Gate::h(QubitId(0)), Gate::z(QubitId(0)), Gate::x(QubitId(1))],
    )
    .unwrap();
    let depth_before = circuit.depth();

    let mut props = PropertySet::new();
    DepthScheduling::new().run(&mut circuit, &mut props).unwrap();

    let kinds: Vec<_> = circuit.gates().iter().map(|g| g.kind).collect();
    assert_eq!(kinds, vec![GateKind::H, GateKind::X, GateKind::Z]);
    assert_eq!(circuit.depth(), depth_before);
}

#[test]
fn test_schedule_keeps_shared_qubit_order() {
    let gates = vec![
        Gate::h(QubitId(0)),
        Gate::cnot(QubitId(0), QubitId(1)),
        Gate::x(QubitId(2)),
        Gate::z(QubitId(1)),
    ];
    let mut circuit = Circuit::from_gates(3, gates).unwrap();

    let mut props = PropertySet::new();
    DepthScheduling::new().run(&mut circuit, &mut props).unwrap();

    let kinds: Vec<_> = circuit.gates().iter().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![GateKind::H, GateKind::X, GateKind::Cnot, GateKind::Z]
    );
}

#[test]
fn test_schedule_skips_trivial_circuits() {
    let circuit = Circuit::new(1);
    assert!(!DepthScheduling::new().should_run(&circuit, &PropertySet::new()));
}
