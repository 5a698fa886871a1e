//! Canonical gate matrices and their application to states.

use ndarray::{Array2, array};
use qsim_ir::{Gate, GateKind, IrError, QubitId, RotationParams};

use crate::complex::{Complex, I, ONE, ZERO};
use crate::error::{StateError, StateResult};
use crate::state::{QuantumState, local_offsets};

/// Largest register [`GateLibrary::expand_operator`] will materialize.
pub const MAX_EXPANDED_QUBITS: usize = 10;

/// The fixed gate library.
///
/// Native matrices index their rows and columns by the gate's operands in
/// `[controls..., target]` order, the first operand being the most
/// significant bit.
pub struct GateLibrary;

impl GateLibrary {
    /// Hadamard: 1/√2 · [[1, 1], [1, -1]].
    pub fn hadamard() -> Array2<Complex> {
        let s = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        array![[s, s], [s, -s]]
    }

    /// Pauli-X: [[0, 1], [1, 0]].
    pub fn pauli_x() -> Array2<Complex> {
        array![[ZERO, ONE], [ONE, ZERO]]
    }

    /// Pauli-Y: [[0, -i], [i, 0]].
    pub fn pauli_y() -> Array2<Complex> {
        array![[ZERO, -I], [I, ZERO]]
    }

    /// Pauli-Z: [[1, 0], [0, -1]].
    pub fn pauli_z() -> Array2<Complex> {
        array![[ONE, ZERO], [ZERO, -ONE]]
    }

    /// CNOT with basis order |control, target⟩.
    pub fn cnot() -> Array2<Complex> {
        let mut m = Array2::<Complex>::eye(4);
        m[[2, 2]] = ZERO;
        m[[3, 3]] = ZERO;
        m[[2, 3]] = ONE;
        m[[3, 2]] = ONE;
        m
    }

    /// SWAP.
    pub fn swap() -> Array2<Complex> {
        let mut m = Array2::<Complex>::eye(4);
        m[[1, 1]] = ZERO;
        m[[2, 2]] = ZERO;
        m[[1, 2]] = ONE;
        m[[2, 1]] = ONE;
        m
    }

    /// Toffoli with basis order |c1, c2, target⟩.
    pub fn toffoli() -> Array2<Complex> {
        let mut m = Array2::<Complex>::eye(8);
        m[[6, 6]] = ZERO;
        m[[7, 7]] = ZERO;
        m[[6, 7]] = ONE;
        m[[7, 6]] = ONE;
        m
    }

    /// U(θ, φ, λ) = [[cos θ/2, -e^{iλ} sin θ/2], [e^{iφ} sin θ/2, e^{i(φ+λ)} cos θ/2]].
    pub fn rotation(params: &RotationParams) -> Array2<Complex> {
        let c = (params.theta / 2.0).cos();
        let s = (params.theta / 2.0).sin();
        let e_il = Complex::from_polar(1.0, params.lambda);
        let e_ip = Complex::from_polar(1.0, params.phi);
        let e_ipl = Complex::from_polar(1.0, params.phi + params.lambda);
        array![[Complex::new(c, 0.0), -e_il * s], [e_ip * s, e_ipl * c]]
    }

    /// Native matrix for `gate`.
    pub fn matrix(gate: &Gate) -> StateResult<Array2<Complex>> {
        let m = match gate.kind {
            GateKind::H => Self::hadamard(),
            GateKind::X => Self::pauli_x(),
            GateKind::Y => Self::pauli_y(),
            GateKind::Z => Self::pauli_z(),
            GateKind::Cnot => Self::cnot(),
            GateKind::Swap => Self::swap(),
            GateKind::Toffoli => Self::toffoli(),
            GateKind::Rot => {
                let params = gate
                    .params
                    .as_ref()
                    .ok_or_else(|| IrError::invalid_gate(gate.name(), "missing rotation parameters"))?;
                Self::rotation(params)
            }
        };
        Ok(m)
    }

    /// Apply `gate` to `state`, returning a new state.
    ///
    /// Only the `2^k` amplitudes of each block that differ in the gate's
    /// operand bits are combined; the full operator is never built.
    pub fn apply(gate: &Gate, state: &QuantumState) -> StateResult<QuantumState> {
        gate.validate(state.num_qubits() as u32)?;
        let matrix = Self::matrix(gate)?;
        let qubits: Vec<QubitId> = gate.qubits().collect();
        let amplitudes = apply_matrix(&matrix, &qubits, state.amplitudes());
        Ok(QuantumState::from_raw(amplitudes, state.num_qubits()))
    }

    /// Full `2^n × 2^n` operator of `gate` on an `n`-qubit register.
    pub fn expand_operator(gate: &Gate, num_qubits: usize) -> StateResult<Array2<Complex>> {
        if num_qubits == 0 || num_qubits > MAX_EXPANDED_QUBITS {
            return Err(StateError::InvalidDimension(format!(
                "operator expansion supports 1..={MAX_EXPANDED_QUBITS} qubits, got {num_qubits}"
            )));
        }
        gate.validate(num_qubits as u32)?;

        let matrix = Self::matrix(gate)?;
        let qubits: Vec<QubitId> = gate.qubits().collect();
        let dim = 1usize << num_qubits;
        let mut operator = Array2::<Complex>::zeros((dim, dim));
        let mut basis = vec![ZERO; dim];

        for col in 0..dim {
            basis[col] = ONE;
            let image = apply_matrix(&matrix, &qubits, &basis);
            for (row, value) in image.into_iter().enumerate() {
                operator[[row, col]] = value;
            }
            basis[col] = ZERO;
        }

        Ok(operator)
    }

    /// Check `M† M = I` within `tol`.
    pub fn is_unitary(matrix: &Array2<Complex>, tol: f64) -> bool {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return false;
        }
        let dagger = matrix.t().mapv(|x| x.conj());
        let product = dagger.dot(matrix);
        product.indexed_iter().all(|((r, c), &v)| {
            let expected = if r == c { ONE } else { ZERO };
            (v - expected).norm() < tol
        })
    }
}

/// Multiply `matrix` into the operand sub-space of `amplitudes`.
fn apply_matrix(matrix: &Array2<Complex>, qubits: &[QubitId], amplitudes: &[Complex]) -> Vec<Complex> {
    let offsets = local_offsets(qubits);
    let mask = qubits.iter().fold(0, |acc, q| acc | q.mask());
    let local_dim = offsets.len();

    let mut out = amplitudes.to_vec();
    let mut local = vec![ZERO; local_dim];

    for base in (0..amplitudes.len()).filter(|b| b & mask == 0) {
        for (slot, &off) in local.iter_mut().zip(&offsets) {
            *slot = amplitudes[base | off];
        }
        for (r, &row_off) in offsets.iter().enumerate() {
            let mut acc = ZERO;
            for (c, &value) in local.iter().enumerate() {
                let m = matrix[[r, c]];
                if m != ZERO {
                    acc += m * value;
                }
            }
            out[base | row_off] = acc;
        }
    }

    out
}
