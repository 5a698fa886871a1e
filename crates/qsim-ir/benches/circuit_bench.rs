//! Benchmarks for qsim circuit operations
//!
//! Run with: cargo bench -p qsim-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsim_ir::{Circuit, Gate, QubitId, layer_assignment};

/// Benchmark appending gates, which recomputes metrics each time
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    for num_gates in &[10u32, 100, 500] {
        group.bench_with_input(
            BenchmarkId::new("h_chain", num_gates),
            num_gates,
            |b, &n| {
                b.iter(|| {
                    let mut circuit = Circuit::new(8);
                    for i in 0..n {
                        circuit.h(black_box(QubitId(i % 8))).unwrap();
                    }
                    circuit
                });
            },
        );
    }

    group.finish();
}

/// Benchmark ASAP layering on a brickwork pattern
fn bench_layering(c: &mut Criterion) {
    let mut group = c.benchmark_group("layering");

    for num_qubits in &[4u32, 12, 24] {
        let mut gates = Vec::new();
        for round in 0..50 {
            for q in ((round % 2)..num_qubits - 1).step_by(2) {
                gates.push(Gate::cnot(QubitId(q), QubitId(q + 1)));
            }
        }

        group.bench_with_input(
            BenchmarkId::new("brickwork", num_qubits),
            &gates,
            |b, gates| {
                b.iter(|| layer_assignment(black_box(*num_qubits), black_box(gates)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gate_addition, bench_layering);
criterion_main!(benches);
