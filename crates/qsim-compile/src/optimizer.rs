//! High-level circuit optimizer.

use qsim_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::CompileResult;
use crate::manager::PassManager;
use crate::property::{CancellationStats, PropertySet};

/// Before/after summary of one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub gates_before: usize,
    pub gates_after: usize,
    pub depth_before: usize,
    pub depth_after: usize,
    /// Gates removed by cancellation passes.
    pub cancelled: usize,
}

impl OptimizationReport {
    /// Net reduction in gate count.
    pub fn gates_removed(&self) -> usize {
        self.gates_before.saturating_sub(self.gates_after)
    }

    /// Net reduction in depth.
    pub fn depth_reduction(&self) -> usize {
        self.depth_before.saturating_sub(self.depth_after)
    }
}

/// Produces an optimized copy of a circuit.
///
/// The input circuit is never modified; every call clones it and runs the
/// pipeline on the clone.
///
/// ```
/// use qsim_compile::Optimizer;
/// use qsim_ir::{Circuit, QubitId};
///
/// let mut circuit = Circuit::new(1);
/// circuit.h(QubitId(0)).unwrap().h(QubitId(0)).unwrap();
///
/// let optimized = Optimizer::new().optimize_circuit(&circuit).unwrap();
/// assert!(optimized.is_empty());
/// assert_eq!(circuit.gate_count(), 2);
/// ```
pub struct Optimizer {
    pass_manager: PassManager,
}

impl Optimizer {
    /// Optimizer running the standard pipeline.
    pub fn new() -> Self {
        Self::with_pass_manager(PassManager::standard())
    }

    /// Optimizer running a custom pipeline.
    pub fn with_pass_manager(pass_manager: PassManager) -> Self {
        Self { pass_manager }
    }

    /// Return an optimized copy of `circuit`.
    pub fn optimize_circuit(&self, circuit: &Circuit) -> CompileResult<Circuit> {
        self.optimize_with_report(circuit).map(|(optimized, _)| optimized)
    }

    /// Return an optimized copy of `circuit` with a summary of the changes.
    #[instrument(skip_all, fields(gates = circuit.gate_count()))]
    pub fn optimize_with_report(
        &self,
        circuit: &Circuit,
    ) -> CompileResult<(Circuit, OptimizationReport)> {
        let mut optimized = circuit.clone();
        let mut props = PropertySet::new();
        self.pass_manager.run(&mut optimized, &mut props)?;

        let report = OptimizationReport {
            gates_before: circuit.gate_count(),
            gates_after: optimized.gate_count(),
            depth_before: circuit.depth(),
            depth_after: optimized.depth(),
            cancelled: props.get::<CancellationStats>().map_or(0, |s| s.removed),
        };
        info!(
            "Optimized circuit: gates {} -> {}, depth {} -> {}",
            report.gates_before, report.gates_after, report.depth_before, report.depth_after
        );

        Ok((optimized, report))
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}
