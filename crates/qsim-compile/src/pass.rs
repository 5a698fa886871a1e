//! Pass trait and types for optimization passes.

use qsim_ir::Circuit;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of optimization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the circuit.
    Analysis,
    /// Transformation pass that modifies the circuit.
    Transformation,
}

/// A pass that operates on a circuit.
///
/// Transformation passes must preserve the circuit's action on every input
/// state; they may only remove gates that compose to the identity or
/// reorder gates with disjoint operands.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given circuit.
    ///
    /// Analysis passes should leave the circuit alone and record their
    /// findings in the `PropertySet`.
    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _circuit: &Circuit, _properties: &PropertySet) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountGates;

    #[derive(Debug, PartialEq)]
    struct GateTotal(usize);

    impl Pass for CountGates {
        fn name(&self) -> &'static str {
            "count_gates"
        }

        fn kind(&self) -> PassKind {
            PassKind::Analysis
        }

        fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
            properties.insert(GateTotal(circuit.gate_count()));
            Ok(())
        }
    }

    #[test]
    fn test_analysis_pass_writes_property() {
        let mut circuit = Circuit::bell().unwrap();
        let mut props = PropertySet::new();

        let pass = CountGates;
        assert_eq!(pass.kind(), PassKind::Analysis);
        assert!(pass.should_run(&circuit, &props));

        pass.run(&mut circuit, &mut props).unwrap();
        assert_eq!(props.get::<GateTotal>(), Some(&GateTotal(2)));
        assert_eq!(circuit.gate_count(), 2);
    }
}
