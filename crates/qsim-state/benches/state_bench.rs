//! Benchmarks for state-vector gate application
//!
//! Run with: cargo bench -p qsim-state

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsim_ir::{Gate, QubitId};
use qsim_state::{GateLibrary, QuantumState};

fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_h");

    for num_qubits in &[4usize, 10, 16] {
        let state = QuantumState::new(*num_qubits).unwrap();
        let gate = Gate::h(QubitId(0));
        group.bench_with_input(BenchmarkId::from_parameter(num_qubits), &state, |b, s| {
            b.iter(|| GateLibrary::apply(black_box(&gate), black_box(s)).unwrap());
        });
    }

    group.finish();
}

fn bench_toffoli(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_toffoli");

    for num_qubits in &[4usize, 10, 16] {
        let state = QuantumState::new(*num_qubits).unwrap();
        let gate = Gate::toffoli(QubitId(0), QubitId(1), QubitId(2));
        group.bench_with_input(BenchmarkId::from_parameter(num_qubits), &state, |b, s| {
            b.iter(|| GateLibrary::apply(black_box(&gate), black_box(s)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_qubit, bench_toffoli);
criterion_main!(benches);
