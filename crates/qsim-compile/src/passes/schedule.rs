//! Depth-minimizing gate scheduling.

use qsim_ir::{Circuit, Gate, layer_assignment};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// ASAP scheduling pass.
///
/// Assigns every gate the layer computed by [`layer_assignment`] and emits
/// gates ordered by `(layer, original position)`. Gates sharing a qubit
/// always sit in different layers, so their relative order is kept and the
/// circuit's action is unchanged; only operand-disjoint gates move.
pub struct DepthScheduling;

impl DepthScheduling {
    /// Create a new scheduling pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DepthScheduling {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for DepthScheduling {
    fn name(&self) -> &'static str {
        "DepthScheduling"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn should_run(&self, circuit: &Circuit, _properties: &PropertySet) -> bool {
        circuit.gate_count() > 1
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let (layers, depth) = layer_assignment(circuit.num_qubits(), circuit.gates());

        let mut order: Vec<usize> = (0..circuit.gate_count()).collect();
        order.sort_by_key(|&idx| (layers[idx], idx));

        if order.iter().enumerate().all(|(pos, &idx)| pos == idx) {
            debug!("DepthScheduling: already in layer order, depth {}", depth);
            return Ok(());
        }

        let gates = circuit.gates();
        let scheduled: Vec<Gate> = order.iter().map(|&idx| gates[idx].clone()).collect();
        *circuit = Circuit::from_gates(circuit.num_qubits(), scheduled)?;

        debug!("DepthScheduling: reordered into {} layers", depth);
        Ok(())
    }
}
