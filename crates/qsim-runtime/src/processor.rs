//! The quantum processor state machine.
//!
//! A [`Processor`] owns one state vector, the circuit applied to it so far,
//! per-qubit coherence figures, and two append-only logs. Every mutating
//! call validates fully before touching anything, so a rejected call
//! leaves the processor exactly as it was.

use std::f64::consts::FRAC_PI_2;

use chrono::Utc;
use qsim_compile::{OptimizationReport, Optimizer};
use qsim_ir::{Circuit, Gate, QubitId};
use qsim_state::{EntanglementMap, GateLibrary, QuantumState, StateError};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{Span, debug, info, info_span, instrument, warn};

use crate::backend::BackendDescriptor;
use crate::config::ProcessorConfig;
use crate::encoding::acceleration_factor;
use crate::error::{RuntimeError, RuntimeResult};
use crate::history::{
    ErrorKind, MeasurementBasis, MeasurementRecord, QuantumErrorRecord, Severity,
};

/// Lifecycle of a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorStatus {
    Uninitialized,
    Initialized,
    /// Terminal.
    Disposed,
}

/// Snapshot of processor diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorMetrics {
    pub num_qubits: u32,
    pub gate_count: usize,
    pub depth: usize,
    pub fidelity: f64,
    pub noise: f64,
    pub error_rate: f64,
    pub mean_coherence: f64,
    /// See [`acceleration_factor`]. Not a measured speedup.
    pub acceleration_factor: f64,
}

/// A simulated quantum processor bound to one backend.
///
/// # Example
///
/// ```
/// use qsim_ir::{Gate, QubitId};
/// use qsim_runtime::{BackendDescriptor, Processor, ProcessorConfig};
///
/// let config = ProcessorConfig::default().with_seed(7);
/// let mut processor = Processor::new(BackendDescriptor::simulator(2), config);
/// processor.initialize().unwrap();
///
/// processor.apply_gate(Gate::h(QubitId(0))).unwrap();
/// processor.apply_gate(Gate::cnot(QubitId(0), QubitId(1))).unwrap();
///
/// let a = processor.measure(QubitId(0), "computational").unwrap();
/// let b = processor.measure(QubitId(1), "computational").unwrap();
/// assert_eq!(a, b);
/// ```
pub struct Processor {
    backend: BackendDescriptor,
    config: ProcessorConfig,
    status: ProcessorStatus,
    state: Option<QuantumState>,
    circuit: Circuit,
    coherence: Vec<f64>,
    /// Qubits currently below the coherence alarm.
    alarmed: Vec<bool>,
    error_rate: f64,
    error_history: Vec<QuantumErrorRecord>,
    measurement_history: Vec<MeasurementRecord>,
    optimizer: Optimizer,
    rng: Box<dyn RngCore + Send>,
    span: Span,
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("backend", &self.backend.name)
            .field("status", &self.status)
            .field("num_qubits", &self.circuit.num_qubits())
            .field("gates", &self.circuit.gate_count())
            .field("error_rate", &self.error_rate)
            .finish_non_exhaustive()
    }
}

impl Processor {
    /// Create an uninitialized processor.
    ///
    /// The measurement RNG is seeded from `config.seed` when present.
    pub fn new(backend: BackendDescriptor, config: ProcessorConfig) -> Self {
        let rng: Box<dyn RngCore + Send> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        let span = info_span!("processor", backend = %backend.name);

        Self {
            error_rate: backend.metrics.error_rate,
            backend,
            config,
            status: ProcessorStatus::Uninitialized,
            state: None,
            circuit: Circuit::new(0),
            coherence: Vec::new(),
            alarmed: Vec::new(),
            error_history: Vec::new(),
            measurement_history: Vec::new(),
            optimizer: Optimizer::new(),
            rng,
            span,
        }
    }

    /// Replace the tracing span every operation runs in.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Replace the measurement RNG.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the optimizer used by [`Processor::optimize`].
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = optimizer;
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Allocate the register and reset every log.
    ///
    /// Re-initializing an initialized processor starts over from |0…0⟩.
    pub fn initialize(&mut self) -> RuntimeResult<()> {
        let span = self.span.clone();
        let _enter = span.enter();

        if self.status == ProcessorStatus::Disposed {
            return Err(RuntimeError::NotInitialized(
                "processor has been disposed".into(),
            ));
        }

        let max_qubits = self.backend.capabilities.max_qubits;
        let num_qubits = self.config.num_qubits.unwrap_or(max_qubits);
        if num_qubits > max_qubits {
            return Err(StateError::InvalidDimension(format!(
                "{num_qubits} qubits requested, backend '{}' supports {max_qubits}",
                self.backend.name
            ))
            .into());
        }
        let state = QuantumState::new(num_qubits as usize)?;

        self.state = Some(state);
        self.circuit = Circuit::new(num_qubits);
        self.coherence = vec![1.0; num_qubits as usize];
        self.alarmed = vec![false; num_qubits as usize];
        self.error_rate = self.backend.metrics.error_rate;
        self.error_history.clear();
        self.measurement_history.clear();
        self.status = ProcessorStatus::Initialized;

        if self.error_rate > self.backend.constraints.min_coherence {
            self.log_event(
                ErrorKind::Initialization,
                None,
                Severity::Medium,
                format!(
                    "baseline error rate {:.4} exceeds correction threshold {:.4}",
                    self.error_rate, self.backend.constraints.min_coherence
                ),
            );
        }

        info!(num_qubits, "processor initialized");
        Ok(())
    }

    /// Drop the register, clear both logs, and move to `Disposed`.
    pub fn cleanup(&mut self) {
        let span = self.span.clone();
        let _enter = span.enter();

        if let Some(mut state) = self.state.take() {
            state.clear();
        }
        self.circuit = Circuit::new(0);
        self.coherence.clear();
        self.alarmed.clear();
        self.error_history.clear();
        self.measurement_history.clear();
        self.status = ProcessorStatus::Disposed;

        info!("processor disposed");
    }

    fn require_state(&self) -> RuntimeResult<&QuantumState> {
        match (&self.status, &self.state) {
            (ProcessorStatus::Initialized, Some(state)) => Ok(state),
            (ProcessorStatus::Disposed, _) => Err(RuntimeError::NotInitialized(
                "processor has been disposed".into(),
            )),
            _ => Err(RuntimeError::NotInitialized(
                "call initialize() first".into(),
            )),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Apply one gate.
    ///
    /// Rejects gate kinds the backend does not offer, malformed operands,
    /// and gates that would push the circuit past the backend's depth or
    /// per-qubit limits. Decoherence and error-correction outcomes are
    /// logged, never returned as errors.
    #[instrument(parent = &self.span, skip(self, gate), fields(gate = %gate))]
    pub fn apply_gate(&mut self, gate: Gate) -> RuntimeResult<()> {
        let state = self.require_state()?;

        if !self.backend.capabilities.supports(gate.kind) {
            return Err(RuntimeError::BackendCapabilityError(format!(
                "gate '{}' is not offered by backend '{}'",
                gate.kind, self.backend.name
            )));
        }
        gate.validate(self.circuit.num_qubits())?;

        let mut circuit = self.circuit.clone();
        circuit.add_gate(gate.clone())?;
        self.check_constraints(&circuit, &gate)?;

        let next = GateLibrary::apply(&gate, state)?;

        // Validation done; commit.
        self.state = Some(next);
        self.circuit = circuit;
        self.after_operation(&gate);

        debug!(depth = self.circuit.depth(), "gate applied");
        Ok(())
    }

    fn check_constraints(&self, circuit: &Circuit, gate: &Gate) -> RuntimeResult<()> {
        let limits = &self.backend.constraints;

        let depth = circuit.depth();
        if depth > limits.max_circuit_depth {
            return Err(RuntimeError::BackendCapabilityError(format!(
                "circuit depth {depth} would exceed limit {}",
                limits.max_circuit_depth
            )));
        }

        let per_qubit = circuit.gates_per_qubit();
        for q in gate.qubits() {
            let count = per_qubit[q.index()];
            if count > limits.max_gates_per_qubit {
                return Err(RuntimeError::BackendCapabilityError(format!(
                    "{q} would carry {count} gates, limit is {}",
                    limits.max_gates_per_qubit
                )));
            }
        }

        Ok(())
    }

    /// Decoherence bookkeeping after a committed gate.
    fn after_operation(&mut self, gate: &Gate) {
        let operands: Vec<QubitId> = gate.qubits().collect();

        for q in &operands {
            self.coherence[q.index()] *= self.config.decoherence_decay;
        }

        let min_coherence = operands
            .iter()
            .map(|q| self.coherence[q.index()])
            .fold(1.0, f64::min);
        let base_rate = gate
            .error_rate
            .or_else(|| self.backend.gate_error_rate(gate.kind))
            .unwrap_or(self.error_rate);
        let estimate = base_rate + (1.0 - min_coherence);

        if self.config.error_correction && estimate > self.backend.constraints.min_coherence {
            for q in &operands {
                let c = &mut self.coherence[q.index()];
                *c = (*c + self.config.correction_boost).min(1.0);
            }
            self.error_rate *= self.config.correction_error_factor;
            self.log_event(
                ErrorKind::Gate,
                Some(gate.target),
                Severity::Low,
                format!(
                    "corrected {} (estimated error {estimate:.4}), error rate now {:.4}",
                    gate.name(),
                    self.error_rate
                ),
            );
        }

        self.check_alarms(&operands);
    }

    fn check_alarms(&mut self, qubits: &[QubitId]) {
        let alarm = self.config.coherence_alarm;
        for &q in qubits {
            let coherence = self.coherence[q.index()];
            let below = coherence < alarm;
            if below && !self.alarmed[q.index()] {
                let severity = if coherence < alarm / 2.0 {
                    Severity::High
                } else {
                    Severity::Medium
                };
                warn!(qubit = %q, coherence, "coherence below alarm threshold");
                self.log_event(
                    ErrorKind::Decoherence,
                    Some(q),
                    severity,
                    format!("coherence {coherence:.4} below {alarm:.4}"),
                );
            }
            self.alarmed[q.index()] = below;
        }
    }

    fn log_event(
        &mut self,
        kind: ErrorKind,
        qubit: Option<QubitId>,
        severity: Severity,
        details: String,
    ) {
        debug!(?kind, ?severity, %details, "physical event");
        self.error_history
            .push(QuantumErrorRecord::new(kind, qubit, severity, details));
    }

    /// Measure one qubit in the named basis (`computational`, `hadamard`
    /// or `phase`). Returns 0 or 1.
    pub fn measure(&mut self, qubit: QubitId, basis: &str) -> RuntimeResult<u8> {
        self.require_state()?;
        let basis: MeasurementBasis = basis.parse()?;
        self.measure_in(qubit, basis)
    }

    /// Measure one qubit in `basis`.
    ///
    /// The basis change is recorded in the circuit and stays applied.
    #[instrument(parent = &self.span, skip(self))]
    pub fn measure_in(&mut self, qubit: QubitId, basis: MeasurementBasis) -> RuntimeResult<u8> {
        let state = self.require_state()?;
        let num_qubits = self.circuit.num_qubits();
        if qubit.0 >= num_qubits {
            return Err(StateError::IndexOutOfRange {
                index: qubit.index(),
                bound: num_qubits as usize,
            }
            .into());
        }

        let basis_change = match basis {
            MeasurementBasis::Computational => None,
            MeasurementBasis::Hadamard => Some(Gate::h(qubit)),
            MeasurementBasis::Phase => Some(Gate::rot(qubit, FRAC_PI_2, 0.0, FRAC_PI_2)),
        };

        let mut circuit = self.circuit.clone();
        let mut next = state.clone();
        if let Some(gate) = &basis_change {
            circuit.add_gate(gate.clone())?;
            next = GateLibrary::apply(gate, &next)?;
        }

        let result = next.measure_qubit(qubit, &mut self.rng)?;

        self.state = Some(next);
        self.circuit = circuit;
        self.measurement_history.push(MeasurementRecord {
            qubit,
            basis,
            result,
            timestamp: Utc::now(),
            error_rate: self.error_rate,
        });

        let coherence = self.coherence[qubit.index()];
        if coherence < self.config.coherence_alarm {
            self.log_event(
                ErrorKind::Measurement,
                Some(qubit),
                Severity::Medium,
                format!("measured with coherence {coherence:.4}"),
            );
        }

        debug!(result, "qubit measured");
        Ok(result)
    }

    /// Replace the owned circuit with its optimized copy.
    ///
    /// The state vector is not recomputed: the optimized circuit has the
    /// same action.
    pub fn optimize(&mut self) -> RuntimeResult<OptimizationReport> {
        let span = self.span.clone();
        let _enter = span.enter();

        self.require_state()?;
        let (optimized, report) = self.optimizer.optimize_with_report(&self.circuit)?;
        self.circuit = optimized;
        Ok(report)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current state vector.
    pub fn state(&self) -> RuntimeResult<&QuantumState> {
        self.require_state()
    }

    /// Logged physical-simulation events, oldest first.
    pub fn error_history(&self) -> &[QuantumErrorRecord] {
        &self.error_history
    }

    /// Measurements taken, oldest first.
    pub fn measurement_history(&self) -> &[MeasurementRecord] {
        &self.measurement_history
    }

    /// The circuit applied since initialization.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Per-qubit coherence in `[0, 1]`.
    pub fn coherence(&self) -> &[f64] {
        &self.coherence
    }

    pub fn status(&self) -> ProcessorStatus {
        self.status
    }

    /// Current processor error rate.
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    pub fn backend(&self) -> &BackendDescriptor {
        &self.backend
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Synthetic acceleration ratio of the owned circuit.
    pub fn acceleration_factor(&self) -> f64 {
        acceleration_factor(self.circuit.num_qubits(), self.circuit.depth())
    }

    /// Pairwise entanglement strengths of the current state.
    ///
    /// Costs `O(n² · 2ⁿ)`; see [`EntanglementMap::from_state`].
    pub fn entanglement_map(&self) -> RuntimeResult<EntanglementMap> {
        Ok(EntanglementMap::from_state(self.require_state()?)?)
    }

    /// Diagnostic snapshot.
    pub fn metrics(&self) -> RuntimeResult<ProcessorMetrics> {
        self.require_state()?;
        let circuit_metrics = self.circuit.metrics();
        let mean_coherence = if self.coherence.is_empty() {
            0.0
        } else {
            self.coherence.iter().sum::<f64>() / self.coherence.len() as f64
        };

        Ok(ProcessorMetrics {
            num_qubits: self.circuit.num_qubits(),
            gate_count: self.circuit.gate_count(),
            depth: circuit_metrics.depth,
            fidelity: circuit_metrics.fidelity,
            noise: circuit_metrics.noise,
            error_rate: self.error_rate,
            mean_coherence,
            acceleration_factor: self.acceleration_factor(),
        })
    }
}
