//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// The fixed gate library supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X gate.
    Cnot,
    /// SWAP gate. Its second operand is carried as the gate's control.
    Swap,
    /// Toffoli (CCX) gate: two controls and one target.
    Toffoli,
    /// Parametrized single-qubit rotation U(θ, φ, λ).
    Rot,
}

impl GateKind {
    /// Every gate kind, in library order.
    pub const ALL: [GateKind; 8] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::Cnot,
        GateKind::Swap,
        GateKind::Toffoli,
        GateKind::Rot,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::Cnot => "cnot",
            GateKind::Swap => "swap",
            GateKind::Toffoli => "toffoli",
            GateKind::Rot => "rot",
        }
    }

    /// Number of control operands the gate takes besides its target.
    #[inline]
    pub fn num_controls(self) -> usize {
        match self {
            GateKind::H | GateKind::X | GateKind::Y | GateKind::Z | GateKind::Rot => 0,
            GateKind::Cnot | GateKind::Swap => 1,
            GateKind::Toffoli => 2,
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        self.num_controls() + 1
    }

    /// Single-qubit gates with `G · G = I`.
    #[inline]
    pub fn is_self_inverse_single_qubit(self) -> bool {
        matches!(self, GateKind::H | GateKind::X | GateKind::Y | GateKind::Z)
    }

    /// Check if this gate takes rotation parameters.
    #[inline]
    pub fn is_parameterized(self) -> bool {
        matches!(self, GateKind::Rot)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "h" | "hadamard" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "cnot" | "cx" => Ok(GateKind::Cnot),
            "swap" => Ok(GateKind::Swap),
            "toffoli" | "ccx" => Ok(GateKind::Toffoli),
            "rot" | "u" => Ok(GateKind::Rot),
            _ => Err(IrError::invalid_gate(s, "unknown gate type")),
        }
    }
}

/// Angles of a [`GateKind::Rot`] gate, U(θ, φ, λ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    /// Polar rotation angle θ.
    pub theta: f64,
    /// Phase φ applied to the |1⟩ row.
    pub phi: f64,
    /// Phase λ applied to the |1⟩ column.
    pub lambda: f64,
}

impl RotationParams {
    /// Create a new set of rotation angles.
    pub fn new(theta: f64, phi: f64, lambda: f64) -> Self {
        Self { theta, phi, lambda }
    }

    fn is_finite(&self) -> bool {
        self.theta.is_finite() && self.phi.is_finite() && self.lambda.is_finite()
    }
}

/// A gate applied to concrete qubits.
///
/// Gates are immutable once built; they are validated against a register
/// size when inserted into a circuit or applied to a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// The target qubit.
    pub target: QubitId,
    /// Control qubits, in matrix operand order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<QubitId>,
    /// Rotation angles, only for [`GateKind::Rot`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RotationParams>,
    /// Per-gate error rate overriding the circuit default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
}

impl Gate {
    fn single(kind: GateKind, target: QubitId) -> Self {
        Self {
            kind,
            target,
            controls: vec![],
            params: None,
            error_rate: None,
        }
    }

    /// Hadamard gate.
    pub fn h(target: QubitId) -> Self {
        Self::single(GateKind::H, target)
    }

    /// Pauli-X gate.
    pub fn x(target: QubitId) -> Self {
        Self::single(GateKind::X, target)
    }

    /// Pauli-Y gate.
    pub fn y(target: QubitId) -> Self {
        Self::single(GateKind::Y, target)
    }

    /// Pauli-Z gate.
    pub fn z(target: QubitId) -> Self {
        Self::single(GateKind::Z, target)
    }

    /// CNOT gate.
    pub fn cnot(control: QubitId, target: QubitId) -> Self {
        Self {
            controls: vec![control],
            ..Self::single(GateKind::Cnot, target)
        }
    }

    /// SWAP gate exchanging `a` and `b`.
    pub fn swap(a: QubitId, b: QubitId) -> Self {
        Self {
            controls: vec![a],
            ..Self::single(GateKind::Swap, b)
        }
    }

    /// Toffoli gate.
    pub fn toffoli(c1: QubitId, c2: QubitId, target: QubitId) -> Self {
        Self {
            controls: vec![c1, c2],
            ..Self::single(GateKind::Toffoli, target)
        }
    }

    /// Parametrized rotation U(θ, φ, λ).
    pub fn rot(target: QubitId, theta: f64, phi: f64, lambda: f64) -> Self {
        Self {
            params: Some(RotationParams::new(theta, phi, lambda)),
            ..Self::single(GateKind::Rot, target)
        }
    }

    /// Attach a per-gate error rate.
    #[must_use]
    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The first control, if any.
    pub fn control(&self) -> Option<QubitId> {
        self.controls.first().copied()
    }

    /// All operands in matrix order: controls first, target last.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls
            .iter()
            .copied()
            .chain(std::iter::once(self.target))
    }

    /// Check whether this gate touches `qubit`.
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.target == qubit || self.controls.contains(&qubit)
    }

    /// Error rate used for metrics, falling back to `default`.
    #[inline]
    pub fn effective_error_rate(&self, default: f64) -> f64 {
        self.error_rate.unwrap_or(default)
    }

    /// Validate operands and parameters against a register of `num_qubits`.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let name = self.name();

        if self.target.0 >= num_qubits {
            return Err(IrError::invalid_gate(
                name,
                format!("target {} out of range for {num_qubits} qubits", self.target),
            ));
        }

        let expected = self.kind.num_controls();
        if self.controls.len() != expected {
            return Err(IrError::invalid_gate(
                name,
                format!(
                    "requires {expected} control operand(s), got {}",
                    self.controls.len()
                ),
            ));
        }

        for (i, &control) in self.controls.iter().enumerate() {
            if control.0 >= num_qubits {
                return Err(IrError::invalid_gate(
                    name,
                    format!("control {control} out of range for {num_qubits} qubits"),
                ));
            }
            if control == self.target {
                return Err(IrError::invalid_gate(
                    name,
                    format!("control and target are both {control}"),
                ));
            }
            if self.controls[..i].contains(&control) {
                return Err(IrError::invalid_gate(
                    name,
                    format!("duplicate control {control}"),
                ));
            }
        }

        match (self.kind.is_parameterized(), &self.params) {
            (true, None) => {
                return Err(IrError::invalid_gate(name, "missing rotation parameters"));
            }
            (true, Some(p)) if !p.is_finite() => {
                return Err(IrError::invalid_gate(name, "rotation parameters must be finite"));
            }
            (false, Some(_)) => {
                return Err(IrError::invalid_gate(name, "gate does not take parameters"));
            }
            _ => {}
        }

        if let Some(rate) = self.error_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(IrError::invalid_gate(
                    name,
                    format!("error rate {rate} outside [0, 1]"),
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(p) = &self.params {
            write!(f, "({:.4}, {:.4}, {:.4})", p.theta, p.phi, p.lambda)?;
        }
        let operands: Vec<String> = self.qubits().map(|q| q.to_string()).collect();
        write!(f, " {}", operands.join(", "))
    }
}
