//! Backend descriptors.
//!
//! A [`BackendDescriptor`] tells a [`Processor`](crate::Processor) what the
//! simulated device accepts (register size, gate kinds), which limits it
//! enforces on a circuit, and its baseline noise figures. Descriptors are
//! read-only once a processor owns one.

use std::collections::{BTreeMap, BTreeSet};

use qsim_ir::GateKind;
use qsim_state::MAX_QUBITS;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// What the backend can execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Size of the register a processor allocates by default.
    pub max_qubits: u32,
    /// Gate kinds the backend accepts.
    pub gate_types: BTreeSet<GateKind>,
    /// Per-kind error rates overriding the backend's baseline rate.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub error_rates: BTreeMap<GateKind, f64>,
    /// Coherence time, in microseconds.
    pub coherence_time: f64,
}

impl Capabilities {
    /// Capabilities of the state-vector simulator: every gate kind.
    pub fn simulator(max_qubits: u32) -> Self {
        Self {
            max_qubits,
            gate_types: GateKind::ALL.into_iter().collect(),
            error_rates: BTreeMap::new(),
            coherence_time: 100.0,
        }
    }

    /// Check if `kind` is accepted.
    pub fn supports(&self, kind: GateKind) -> bool {
        self.gate_types.contains(&kind)
    }
}

/// Limits enforced on the circuit a processor accumulates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum circuit depth.
    pub max_circuit_depth: usize,
    /// Maximum number of gates touching any single qubit.
    pub max_gates_per_qubit: usize,
    /// Error-rate threshold above which error correction intervenes.
    pub min_coherence: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_circuit_depth: 1000,
            max_gates_per_qubit: 1000,
            min_coherence: 0.1,
        }
    }
}

/// Baseline quality figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendMetrics {
    pub fidelity: f64,
    pub error_rate: f64,
    /// Nominal execution time per gate, in microseconds.
    pub execution_time: f64,
}

impl Default for BackendMetrics {
    fn default() -> Self {
        Self {
            fidelity: 0.999,
            error_rate: 0.001,
            execution_time: 0.0,
        }
    }
}

/// Full description of a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    pub name: String,
    pub capabilities: Capabilities,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub metrics: BackendMetrics,
}

impl BackendDescriptor {
    /// State-vector simulator with `max_qubits` qubits and default limits.
    pub fn simulator(max_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            capabilities: Capabilities::simulator(max_qubits),
            constraints: Constraints::default(),
            metrics: BackendMetrics::default(),
        }
    }

    /// Set the backend name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restrict the accepted gate kinds.
    #[must_use]
    pub fn with_gate_types(mut self, kinds: impl IntoIterator<Item = GateKind>) -> Self {
        self.capabilities.gate_types = kinds.into_iter().collect();
        self
    }

    /// Set the error rate of one gate kind.
    #[must_use]
    pub fn with_error_rate(mut self, kind: GateKind, rate: f64) -> Self {
        self.capabilities.error_rates.insert(kind, rate);
        self
    }

    /// Replace the circuit limits.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replace the baseline metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: BackendMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Error rate configured for `kind`, if any.
    pub fn gate_error_rate(&self, kind: GateKind) -> Option<f64> {
        self.capabilities.error_rates.get(&kind).copied()
    }

    /// Parse a descriptor from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let backend: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        backend.validate()?;
        Ok(backend)
    }

    /// Validate descriptor values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.capabilities.max_qubits;
        if max == 0 || max as usize > MAX_QUBITS {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be in 1..={MAX_QUBITS}, got {max}"
            )));
        }
        if self.capabilities.gate_types.is_empty() {
            return Err(ConfigError::ValidationError(
                "gate_types must not be empty".to_string(),
            ));
        }
        for (kind, rate) in &self.capabilities.error_rates {
            if !(0.0..=1.0).contains(rate) {
                return Err(ConfigError::ValidationError(format!(
                    "error rate for {kind} must be in [0, 1], got {rate}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.metrics.error_rate) {
            return Err(ConfigError::ValidationError(format!(
                "backend error_rate must be in [0, 1], got {}",
                self.metrics.error_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.constraints.min_coherence) {
            return Err(ConfigError::ValidationError(format!(
                "min_coherence must be in [0, 1], got {}",
                self.constraints.min_coherence
            )));
        }
        Ok(())
    }
}
