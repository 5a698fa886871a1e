//! qsim Runtime
//!
//! This crate ties the state-vector engine to a backend description and
//! exposes it as a stateful [`Processor`]:
//!
//! ```text
//! Uninitialized ──initialize()──► Initialized ──cleanup()──► Disposed
//!                                  │    ▲
//!                                  └────┘ apply_gate / measure / optimize
//! ```
//!
//! Programmer errors (unknown basis, unsupported gate, bad operands, use
//! outside `Initialized`) are returned as [`RuntimeError`]s before anything
//! changes. Physical-simulation events (decoherence, error-correction
//! interventions) never fail a call; they are appended to the processor's
//! error history.
//!
//! # Components
//!
//! - [`BackendDescriptor`]: capabilities, constraints and baseline metrics
//! - [`ProcessorConfig`] / [`Config`]: YAML + environment configuration
//! - [`Processor`]: the state machine
//! - [`FeatureEncoder`]: the `enhance` feature transform
//! - [`AsyncProcessor`] / [`QuantumAccelerator`]: async façade
//! - [`telemetry`]: subscriber setup for binaries
//!
//! # Example
//!
//! ```rust
//! use qsim_ir::{Gate, QubitId};
//! use qsim_runtime::{BackendDescriptor, FeatureEncoder, Processor, ProcessorConfig};
//!
//! let mut processor = Processor::new(
//!     BackendDescriptor::simulator(3),
//!     ProcessorConfig::default().with_error_correction(true).with_seed(42),
//! );
//! processor.initialize().unwrap();
//! processor.apply_gate(Gate::h(QubitId(0))).unwrap();
//! let bit = processor.measure(QubitId(0), "hadamard").unwrap();
//! assert_eq!(bit, 0);
//!
//! let features = FeatureEncoder::new().enhance(&[0.5, 1.0, 0.25]).unwrap();
//! assert_eq!(features.len(), 3);
//! ```

pub mod accelerator;
pub mod backend;
pub mod config;
pub mod encoding;
pub mod error;
pub mod history;
pub mod processor;
pub mod telemetry;

pub use accelerator::{AsyncProcessor, QuantumAccelerator};
pub use backend::{BackendDescriptor, BackendMetrics, Capabilities, Constraints};
pub use config::{Config, ConfigError, ProcessorConfig};
pub use encoding::{FeatureEncoder, acceleration_factor};
pub use error::{RuntimeError, RuntimeResult};
pub use history::{
    ErrorKind, MeasurementBasis, MeasurementRecord, QuantumErrorRecord, Severity,
};
pub use processor::{Processor, ProcessorMetrics, ProcessorStatus};
pub use telemetry::{TracingConfig, TracingFormat};
