//! Feature Enhancement Demo
//!
//! Shares one processor between tokio tasks and pushes feature vectors
//! through the accelerator facade concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use qsim_demos::{feature_batch, print_header, print_result, print_section, print_success};
use qsim_ir::{Gate, QubitId};
use qsim_runtime::{
    AsyncProcessor, Config, FeatureEncoder, Processor, QuantumAccelerator, TracingConfig,
};

#[derive(Parser, Debug)]
#[command(name = "demo-enhance")]
#[command(about = "Enhance feature vectors from concurrent tasks")]
struct Args {
    /// Number of feature vectors
    #[arg(short, long, default_value = "8")]
    batches: usize,

    /// Length of each feature vector
    #[arg(short, long, default_value = "6")]
    len: usize,

    /// Add a CNOT chain after the Hadamard layer
    #[arg(short, long)]
    entangle: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    TracingConfig::from_env().init()?;

    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let num_qubits = config
        .processor
        .num_qubits
        .unwrap_or(config.backend.capabilities.max_qubits);

    print_header("Feature Enhancement Demo");

    let accelerator = AsyncProcessor::new(Processor::new(config.backend, config.processor))
        .with_encoder(FeatureEncoder::new().with_entanglement(args.entangle));
    accelerator.initialize().await?;

    // Give the shared register some history so metrics are non-trivial.
    accelerator.apply_gate(Gate::h(QubitId(0))).await?;
    for q in 1..num_qubits {
        accelerator
            .apply_gate(Gate::cnot(QubitId(q - 1), QubitId(q)))
            .await?;
    }

    print_section("Enhancing");
    let shared: Arc<dyn QuantumAccelerator> = Arc::new(accelerator.clone());
    let mut handles = Vec::new();
    for (idx, features) in feature_batch(args.batches, args.len).into_iter().enumerate() {
        let accel = Arc::clone(&shared);
        handles.push(tokio::spawn(async move {
            let enhanced = accel.enhance(&features).await;
            (idx, enhanced)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let (idx, enhanced) = handle.await?;
        results.push((idx, enhanced?));
    }
    results.sort_by_key(|(idx, _)| *idx);

    for (idx, enhanced) in &results {
        let rendered: Vec<String> = enhanced.iter().map(|v| format!("{v:.3}")).collect();
        print_result(&format!("Batch {idx}"), format!("[{}]", rendered.join(", ")));
    }
    info!(batches = results.len(), "enhancement complete");

    print_section("Processor");
    let metrics = shared.metrics().await?;
    print_result("Qubits", metrics.num_qubits);
    print_result("Depth", metrics.depth);
    print_result("Fidelity", format!("{:.6}", metrics.fidelity));
    print_result("Mean coherence", format!("{:.4}", metrics.mean_coherence));
    print_result(
        "Acceleration factor",
        format!("{:.2}", shared.acceleration_factor().await),
    );
    print_result("Logged events", accelerator.error_history().await.len());

    accelerator.cleanup().await;
    print_success("Processor disposed");
    Ok(())
}
