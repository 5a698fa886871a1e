//! Cancellation of self-inverse gate pairs.

use qsim_ir::{Circuit, Gate};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::{CancellationStats, PropertySet};

/// Self-inverse cancellation pass.
///
/// Removes pairs of H, X, Y or Z gates on the same target with no
/// intervening gate on that qubit: `G · G = I`. Multi-qubit gates act as
/// barriers on every qubit they touch. Cascades such as `H X X H` collapse
/// completely.
pub struct CancelSelfInverse;

impl CancelSelfInverse {
    /// Create a new cancellation pass.
    pub fn new() -> Self {
        Self
    }

    fn cancels(gate: &Gate) -> bool {
        gate.kind.is_self_inverse_single_qubit() && gate.controls.is_empty()
    }

    /// Mark every cancellable pair in one sweep.
    ///
    /// Each qubit keeps a stack of the live gates touching it. A
    /// cancellable gate whose stack top is an identical gate pops that gate
    /// and both are removed, which exposes the previous gate for the next
    /// match.
    #[allow(clippy::unused_self)]
    fn find_removals(&self, circuit: &Circuit) -> Vec<bool> {
        let gates = circuit.gates();
        let mut removed = vec![false; gates.len()];
        let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); circuit.num_qubits() as usize];

        for (idx, gate) in gates.iter().enumerate() {
            if Self::cancels(gate) {
                let stack = &mut stacks[gate.target.index()];
                if let Some(&top) = stack.last() {
                    let prev = &gates[top];
                    if Self::cancels(prev) && prev.kind == gate.kind {
                        stack.pop();
                        removed[top] = true;
                        removed[idx] = true;
                        continue;
                    }
                }
                stack.push(idx);
            } else {
                for q in gate.qubits() {
                    stacks[q.index()].push(idx);
                }
            }
        }

        removed
    }
}

impl Default for CancelSelfInverse {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for CancelSelfInverse {
    fn name(&self) -> &'static str {
        "CancelSelfInverse"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        // Keep cancelling until no more pairs are found.
        // Bound iterations to avoid pathological cases.
        const MAX_ITERATIONS: usize = 100;
        let mut total = 0;

        for _ in 0..MAX_ITERATIONS {
            let removed = self.find_removals(circuit);
            let count = removed.iter().filter(|&&r| r).count();
            if count == 0 {
                break;
            }

            let kept: Vec<Gate> = circuit
                .gates()
                .iter()
                .zip(&removed)
                .filter(|(_, r)| !**r)
                .map(|(g, _)| g.clone())
                .collect();
            *circuit = Circuit::from_gates(circuit.num_qubits(), kept)?;
            total += count;
        }

        debug!("CancelSelfInverse removed {} gates", total);
        match properties.get_mut::<CancellationStats>() {
            Some(stats) => stats.removed += total,
            None => properties.insert(CancellationStats { removed: total }),
        }

        Ok(())
    }
}
