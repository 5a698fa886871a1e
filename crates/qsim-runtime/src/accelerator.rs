//! Async façade over a [`Processor`].
//!
//! The numerical core is synchronous. [`AsyncProcessor`] only lets async
//! callers share one processor: every operation takes the same
//! `tokio::sync::Mutex`, so operations never interleave. Nothing inside the
//! lock awaits.

use std::sync::Arc;

use async_trait::async_trait;
use qsim_compile::OptimizationReport;
use qsim_ir::{Gate, QubitId};
use tokio::sync::{Mutex, MutexGuard};

use crate::encoding::FeatureEncoder;
use crate::error::RuntimeResult;
use crate::history::{MeasurementRecord, QuantumErrorRecord};
use crate::processor::{Processor, ProcessorMetrics};

/// Entry points used by feature-preprocessing collaborators.
#[async_trait]
pub trait QuantumAccelerator: Send + Sync {
    /// Encode and transform a feature vector. See [`FeatureEncoder::enhance`].
    async fn enhance(&self, features: &[f64]) -> RuntimeResult<Vec<f64>>;

    /// Current diagnostic snapshot.
    async fn metrics(&self) -> RuntimeResult<ProcessorMetrics>;

    /// Synthetic acceleration ratio. Not a measured speedup.
    async fn acceleration_factor(&self) -> f64;
}

/// A [`Processor`] shared between tasks.
#[derive(Clone)]
pub struct AsyncProcessor {
    inner: Arc<Mutex<Processor>>,
    encoder: FeatureEncoder,
}

impl AsyncProcessor {
    /// Wrap a processor, using a Hadamard-only encoder for `enhance`.
    pub fn new(processor: Processor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(processor)),
            encoder: FeatureEncoder::new(),
        }
    }

    /// Replace the encoder used by `enhance`.
    #[must_use]
    pub fn with_encoder(mut self, encoder: FeatureEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Exclusive access for multi-step sequences.
    pub async fn lock(&self) -> MutexGuard<'_, Processor> {
        self.inner.lock().await
    }

    pub async fn initialize(&self) -> RuntimeResult<()> {
        self.inner.lock().await.initialize()
    }

    pub async fn apply_gate(&self, gate: Gate) -> RuntimeResult<()> {
        self.inner.lock().await.apply_gate(gate)
    }

    pub async fn measure(&self, qubit: QubitId, basis: &str) -> RuntimeResult<u8> {
        self.inner.lock().await.measure(qubit, basis)
    }

    pub async fn optimize(&self) -> RuntimeResult<OptimizationReport> {
        self.inner.lock().await.optimize()
    }

    pub async fn error_history(&self) -> Vec<QuantumErrorRecord> {
        self.inner.lock().await.error_history().to_vec()
    }

    pub async fn measurement_history(&self) -> Vec<MeasurementRecord> {
        self.inner.lock().await.measurement_history().to_vec()
    }

    pub async fn cleanup(&self) {
        self.inner.lock().await.cleanup();
    }
}

#[async_trait]
impl QuantumAccelerator for AsyncProcessor {
    async fn enhance(&self, features: &[f64]) -> RuntimeResult<Vec<f64>> {
        let _guard = self.inner.lock().await;
        self.encoder.enhance(features)
    }

    async fn metrics(&self) -> RuntimeResult<ProcessorMetrics> {
        self.inner.lock().await.metrics()
    }

    async fn acceleration_factor(&self) -> f64 {
        self.inner.lock().await.acceleration_factor()
    }
}
