//! Pairwise entanglement diagnostics.
//!
//! Strengths are derived from reduced density matrices of the state
//! vector. They are diagnostics only and never feed back into simulation.

use ndarray::Array2;
use qsim_ir::QubitId;
use rustc_hash::FxHashMap;

use crate::complex::Complex;
use crate::error::StateResult;
use crate::state::QuantumState;

/// Maximum of `Tr ρ_ab² − Tr ρ_a² · Tr ρ_b²` over two-qubit states,
/// reached by a Bell pair.
const MAX_PURITY_EXCESS: f64 = 0.75;

fn purity(rho: &Array2<Complex>) -> f64 {
    // ρ is Hermitian, so Tr ρ² = Σ |ρ_ij|².
    rho.iter().map(|x| x.norm_sqr()).sum()
}

/// Correlation strength in `[0, 1]` for every qubit pair.
#[derive(Debug, Clone, Default)]
pub struct EntanglementMap {
    strengths: FxHashMap<(QubitId, QubitId), f64>,
}

impl EntanglementMap {
    /// Compute strengths for every pair of qubits in `state`.
    ///
    /// The score is the excess purity of the pair over the product of its
    /// marginals, scaled so a Bell pair scores 1 and a product state 0.
    ///
    /// Every pair needs its own sweep over the amplitudes, so the cost is
    /// `O(n² · 2ⁿ)`. At 24 qubits that is several billion amplitude visits;
    /// keep this to small registers or occasional diagnostics.
    pub fn from_state(state: &QuantumState) -> StateResult<Self> {
        let n = state.num_qubits() as u32;

        let marginals = (0..n)
            .map(|q| state.reduced_density_matrix(&[QubitId(q)]).map(|rho| purity(&rho)))
            .collect::<StateResult<Vec<f64>>>()?;

        let mut strengths = FxHashMap::default();
        for a in 0..n {
            for b in (a + 1)..n {
                let joint = purity(&state.reduced_density_matrix(&[QubitId(a), QubitId(b)])?);
                let excess = joint - marginals[a as usize] * marginals[b as usize];
                let strength = (excess / MAX_PURITY_EXCESS).clamp(0.0, 1.0);
                strengths.insert((QubitId(a), QubitId(b)), strength);
            }
        }

        Ok(Self { strengths })
    }

    /// Strength between `a` and `b`, in either order. Unknown pairs are 0.
    pub fn strength(&self, a: QubitId, b: QubitId) -> f64 {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.strengths.get(&key).copied().unwrap_or(0.0)
    }

    /// All pairs with their strengths, sorted by pair.
    pub fn pairs(&self) -> Vec<((QubitId, QubitId), f64)> {
        let mut pairs: Vec<_> = self.strengths.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_by_key(|(k, _)| *k);
        pairs
    }

    /// Strongest pairwise correlation, 0 for fewer than two qubits.
    pub fn max_strength(&self) -> f64 {
        self.strengths.values().copied().fold(0.0, f64::max)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.strengths.len()
    }

    /// Check if the map has no pairs.
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::GateLibrary;
    use qsim_ir::Gate;

    fn prepare(num_qubits: usize, gates: &[Gate]) -> QuantumState {
        let mut state = QuantumState::new(num_qubits).unwrap();
        for gate in gates {
            state = GateLibrary::apply(gate, &state).unwrap();
        }
        state
    }

    #[test]
    fn test_bell_pair_is_maximal() {
        let state = prepare(2, &[Gate::h(QubitId(0)), Gate::cnot(QubitId(0), QubitId(1))]);
        let map = EntanglementMap::from_state(&state).unwrap();
        assert_eq!(map.len(), 1);
        assert!((map.strength(QubitId(1), QubitId(0)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_product_state_is_zero() {
        let state = prepare(3, &[Gate::h(QubitId(0)), Gate::h(QubitId(1)), Gate::x(QubitId(2))]);
        let map = EntanglementMap::from_state(&state).unwrap();
        assert_eq!(map.len(), 3);
        assert!(map.max_strength() < 1e-9);
    }

    #[test]
    fn test_only_entangled_pair_scores() {
        let state = prepare(
            3,
            &[Gate::h(QubitId(0)), Gate::cnot(QubitId(0), QubitId(2)), Gate::h(QubitId(1))],
        );
        let map = EntanglementMap::from_state(&state).unwrap();
        assert!(map.strength(QubitId(0), QubitId(2)) > 0.99);
        assert!(map.strength(QubitId(0), QubitId(1)) < 1e-9);
        assert!(map.strength(QubitId(1), QubitId(2)) < 1e-9);

        let pairs = map.pairs();
        assert_eq!(pairs[0].0, (QubitId(0), QubitId(1)));
    }

    #[test]
    fn test_single_qubit_has_no_pairs() {
        let state = QuantumState::new(1).unwrap();
        let map = EntanglementMap::from_state(&state).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.max_strength(), 0.0);
    }
}
