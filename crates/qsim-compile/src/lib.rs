//! qsim Circuit Optimizer
//!
//! This crate rewrites circuits into cheaper equivalents. It uses a
//! pass-based architecture: a [`PassManager`] runs an ordered list of
//! [`Pass`] implementations over a [`Circuit`](qsim_ir::Circuit), sharing
//! intermediate results through a [`PropertySet`].
//!
//! # Architecture
//!
//! ```text
//! Input Circuit (borrowed, cloned)
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (cancellation stats, custom data)
//! └─────────────┘
//!       │
//!       ├── CancelSelfInverse
//!       └── DepthScheduling
//!       │
//!       ▼
//! Optimized Circuit + OptimizationReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use qsim_compile::Optimizer;
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap()
//!     .x(QubitId(0)).unwrap()
//!     .x(QubitId(0)).unwrap()
//!     .h(QubitId(0)).unwrap()
//!     .cnot(QubitId(0), QubitId(1)).unwrap();
//!
//! let (optimized, report) = Optimizer::new().optimize_with_report(&circuit).unwrap();
//! assert_eq!(optimized.gate_count(), 1);
//! assert_eq!(report.cancelled, 4);
//! ```
//!
//! # Custom Passes
//!
//! ```rust
//! use qsim_compile::{CompileResult, Optimizer, Pass, PassKind, PassManager, PropertySet};
//! use qsim_ir::Circuit;
//!
//! struct Noop;
//!
//! impl Pass for Noop {
//!     fn name(&self) -> &str { "noop" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!     fn run(&self, _circuit: &mut Circuit, _props: &mut PropertySet) -> CompileResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut pm = PassManager::standard();
//! pm.add_pass(Noop);
//! let optimizer = Optimizer::with_pass_manager(pm);
//! ```

pub mod error;
pub mod manager;
pub mod optimizer;
pub mod pass;
pub mod passes;
pub mod property;

pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use optimizer::{OptimizationReport, Optimizer};
pub use pass::{Pass, PassKind};
pub use passes::{CancelSelfInverse, DepthScheduling};
pub use property::{CancellationStats, PropertySet};
