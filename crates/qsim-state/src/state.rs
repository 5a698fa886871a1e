//! State-vector representation of an n-qubit register.

use ndarray::Array2;
use qsim_ir::QubitId;
use rand::Rng;

use crate::complex::{Complex, ONE, ZERO};
use crate::error::{StateError, StateResult};

/// Largest register the simulator will allocate (2^24 amplitudes, 256 MiB).
pub const MAX_QUBITS: usize = qsim_ir::MAX_QUBITS as usize;

/// Allowed drift of `Σ|a_i|²` from 1.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// The joint amplitude vector of `n` qubits.
///
/// Qubit `k` is bit `k` of the basis index. Every operation except
/// [`QuantumState::set_amplitude`] leaves the vector normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    amplitudes: Vec<Complex>,
    num_qubits: usize,
}

fn check_num_qubits(num_qubits: usize) -> StateResult<()> {
    if num_qubits < 1 || num_qubits > MAX_QUBITS {
        return Err(StateError::InvalidDimension(format!(
            "{num_qubits} qubits requested, supported range is 1..={MAX_QUBITS}"
        )));
    }
    Ok(())
}

/// Index offsets of every local basis state of `qubits` within the full
/// register. The first qubit is the most significant local bit.
pub(crate) fn local_offsets(qubits: &[QubitId]) -> Vec<usize> {
    let k = qubits.len();
    (0..1usize << k)
        .map(|local| {
            qubits
                .iter()
                .enumerate()
                .filter(|&(m, _)| (local >> (k - 1 - m)) & 1 == 1)
                .fold(0, |acc, (_, q)| acc | q.mask())
        })
        .collect()
}

impl QuantumState {
    /// Create a new state initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> StateResult<Self> {
        check_num_qubits(num_qubits)?;
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Create a state from explicit amplitudes.
    ///
    /// The length must be a power of two of at least 2 and the vector must
    /// already be normalized.
    pub fn from_amplitudes(amplitudes: Vec<Complex>) -> StateResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(StateError::InvalidDimension(format!(
                "amplitude vector length {len} is not a power of two >= 2"
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        check_num_qubits(num_qubits)?;

        let state = Self {
            amplitudes,
            num_qubits,
        };
        let total = state.total_probability();
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(StateError::NormalizationError(format!(
                "amplitudes have total probability {total}"
            )));
        }
        Ok(state)
    }

    /// Encode a real vector as normalized amplitudes.
    ///
    /// The vector is zero-padded to the next power of two (at least 2).
    pub fn from_real_vector(values: &[f64]) -> StateResult<Self> {
        if values.is_empty() {
            return Err(StateError::InvalidDimension(
                "cannot encode an empty vector".into(),
            ));
        }
        let num_qubits = (values.len().next_power_of_two().trailing_zeros() as usize).max(1);
        check_num_qubits(num_qubits)?;

        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        for (amp, &v) in amplitudes.iter_mut().zip(values) {
            *amp = Complex::new(v, 0.0);
        }

        let mut state = Self {
            amplitudes,
            num_qubits,
        };
        state.normalize()?;
        Ok(state)
    }

    pub(crate) fn from_raw(amplitudes: Vec<Complex>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1 << num_qubits);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the state space, `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// All amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex] {
        &self.amplitudes
    }

    fn check_index(&self, index: usize) -> StateResult<()> {
        if index >= self.dim() {
            return Err(StateError::IndexOutOfRange {
                index,
                bound: self.dim(),
            });
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: QubitId) -> StateResult<()> {
        if qubit.index() >= self.num_qubits {
            return Err(StateError::IndexOutOfRange {
                index: qubit.index(),
                bound: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> StateResult<Complex> {
        self.check_index(index)?;
        Ok(self.amplitudes[index])
    }

    /// Probability of observing basis state `index`.
    pub fn probability(&self, index: usize) -> StateResult<f64> {
        self.check_index(index)?;
        Ok(self.amplitudes[index].norm_sqr())
    }

    /// Probabilities of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// `Σ|a_i|²`.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Check the normalization invariant.
    pub fn is_normalized(&self) -> bool {
        (self.total_probability() - 1.0).abs() <= NORMALIZATION_TOLERANCE
    }

    /// Overwrite one amplitude.
    ///
    /// The caller is responsible for restoring normalization, typically by
    /// calling [`QuantumState::normalize`] afterwards.
    pub fn set_amplitude(&mut self, index: usize, value: Complex) -> StateResult<()> {
        self.check_index(index)?;
        self.amplitudes[index] = value;
        Ok(())
    }

    /// Rescale to unit norm.
    pub fn normalize(&mut self) -> StateResult<()> {
        let norm = self.total_probability().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Err(StateError::NormalizationError(format!(
                "cannot normalize a vector with norm {norm}"
            )));
        }
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        Ok(())
    }

    /// Zero every amplitude.
    ///
    /// The result is not a valid state; it only exists so a disposed
    /// register can drop its contents without reallocating.
    pub fn clear(&mut self) {
        self.amplitudes.fill(ZERO);
    }

    /// Joint state of two independently prepared registers.
    ///
    /// `self` occupies the high bits of the combined index and `other` the
    /// low bits: amplitude `i * other.dim() + j` is `self[i] * other[j]`.
    pub fn tensor_product(&self, other: &QuantumState) -> StateResult<QuantumState> {
        let num_qubits = self.num_qubits + other.num_qubits;
        check_num_qubits(num_qubits)?;

        let mut amplitudes = Vec::with_capacity(1 << num_qubits);
        for a in &self.amplitudes {
            for b in &other.amplitudes {
                amplitudes.push(a * b);
            }
        }
        Ok(Self::from_raw(amplitudes, num_qubits))
    }

    /// Measure the whole register in the computational basis.
    ///
    /// Draws one uniform sample and walks the cumulative distribution in
    /// index order; the state collapses to the selected basis state, whose
    /// index is returned.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let u: f64 = rng.gen_range(0.0..1.0);

        let mut outcome = None;
        let mut last_nonzero = 0;
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            last_nonzero = i;
            cumulative += p;
            if cumulative >= u {
                outcome = Some(i);
                break;
            }
        }
        // Rounding can leave the cumulative sum just short of u.
        let outcome = outcome.unwrap_or(last_nonzero);

        self.amplitudes.fill(ZERO);
        self.amplitudes[outcome] = ONE;
        outcome
    }

    /// Probability that `qubit` reads 1.
    pub fn qubit_probability(&self, qubit: QubitId) -> StateResult<f64> {
        self.check_qubit(qubit)?;
        let mask = qubit.mask();
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum())
    }

    /// Projectively measure a single qubit in the computational basis.
    ///
    /// Amplitudes inconsistent with the outcome are zeroed and the rest
    /// renormalized. Returns 0 or 1.
    pub fn measure_qubit<R: Rng + ?Sized>(&mut self, qubit: QubitId, rng: &mut R) -> StateResult<u8> {
        let p_one = self.qubit_probability(qubit)?;
        let u: f64 = rng.gen_range(0.0..1.0);
        let outcome = u8::from(u < p_one);

        let mask = qubit.mask();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            let bit = u8::from(i & mask != 0);
            if bit != outcome {
                *amp = ZERO;
            }
        }
        self.normalize()?;
        Ok(outcome)
    }

    /// Reduced density matrix of `qubits`, tracing out everything else.
    ///
    /// Row and column indices follow the order of `qubits`, the first
    /// qubit being the most significant bit.
    pub fn reduced_density_matrix(&self, qubits: &[QubitId]) -> StateResult<Array2<Complex>> {
        for (i, &q) in qubits.iter().enumerate() {
            self.check_qubit(q)?;
            if qubits[..i].contains(&q) {
                return Err(StateError::InvalidDimension(format!(
                    "qubit {q} listed twice"
                )));
            }
        }

        let offsets = local_offsets(qubits);
        let mask = qubits.iter().fold(0, |acc, q| acc | q.mask());
        let local_dim = offsets.len();
        let mut rho = Array2::<Complex>::zeros((local_dim, local_dim));

        let mut local = vec![ZERO; local_dim];
        for base in (0..self.dim()).filter(|b| b & mask == 0) {
            for (slot, &off) in local.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | off];
            }
            for r in 0..local_dim {
                for c in 0..local_dim {
                    rho[[r, c]] += local[r] * local[c].conj();
                }
            }
        }

        Ok(rho)
    }
}
