//! qsim Demo Suite
//!
//! Small end-to-end walkthroughs of the processor stack:
//!
//! - **Bell sampling**: repeated Bell-pair preparation and measurement
//!   through [`Processor`], reporting correlation statistics
//! - **Optimization**: a redundant circuit run through the standard
//!   pass pipeline, reporting gates and depth before and after
//! - **Feature enhancement**: feature vectors pushed through the
//!   [`QuantumAccelerator`](qsim_runtime::QuantumAccelerator) facade
//!   from concurrent tasks
//!
//! The reusable pieces live here so integration tests can drive them
//! without a terminal.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use qsim_ir::{Circuit, Gate, IrResult, QubitId};
use qsim_runtime::{Config, MeasurementBasis, Processor, RuntimeResult};

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let bar_style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(bar_style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("⚠").yellow(), message);
}

// =============================================================================
// Bell sampling
// =============================================================================

/// Outcome counts from repeated Bell-pair measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BellStats {
    pub shots: usize,
    /// Shots where both qubits agreed.
    pub agreements: usize,
    /// Shots where qubit 0 read 1.
    pub ones: usize,
}

impl BellStats {
    /// Fraction of shots where both qubits agreed.
    pub fn agreement_rate(&self) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.agreements as f64 / self.shots as f64
    }

    /// Fraction of shots where qubit 0 read 1.
    pub fn ones_rate(&self) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.ones as f64 / self.shots as f64
    }
}

/// Prepare and measure a Bell pair `shots` times on one processor.
///
/// The register is forced to two qubits. Each shot re-initializes, so
/// the measurement RNG is the only state carried across shots.
pub fn sample_bell(
    config: &Config,
    shots: usize,
    basis: MeasurementBasis,
    progress: Option<&ProgressBar>,
) -> RuntimeResult<BellStats> {
    let processor_config = config.processor.clone().with_num_qubits(2);
    let mut processor = Processor::new(config.backend.clone(), processor_config);

    let mut stats = BellStats::default();
    for _ in 0..shots {
        processor.initialize()?;
        processor.apply_gate(Gate::h(QubitId(0)))?;
        processor.apply_gate(Gate::cnot(QubitId(0), QubitId(1)))?;

        let a = processor.measure_in(QubitId(0), basis)?;
        let b = processor.measure_in(QubitId(1), basis)?;

        stats.shots += 1;
        if a == b {
            stats.agreements += 1;
        }
        if a == 1 {
            stats.ones += 1;
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    processor.cleanup();
    Ok(stats)
}

// =============================================================================
// Optimization
// =============================================================================

/// A GHZ preparation padded with `padding` cancelling pairs per qubit.
///
/// Odd positions alternate `H H` and `X X` so the optimizer has work in
/// both gate families.
pub fn redundant_ghz(num_qubits: u32, padding: usize) -> IrResult<Circuit> {
    let mut circuit = Circuit::new(num_qubits);
    for q in 0..num_qubits {
        for round in 0..padding {
            if round % 2 == 0 {
                circuit.h(QubitId(q))?.h(QubitId(q))?;
            } else {
                circuit.x(QubitId(q))?.x(QubitId(q))?;
            }
        }
    }

    if num_qubits > 0 {
        circuit.h(QubitId(0))?;
        for q in 1..num_qubits {
            circuit.cnot(QubitId(q - 1), QubitId(q))?;
        }
    }
    Ok(circuit)
}

/// Deterministic feature vectors for the enhancement demo.
pub fn feature_batch(batches: usize, len: usize) -> Vec<Vec<f64>> {
    (0..batches)
        .map(|b| {
            (0..len)
                .map(|i| ((b * len + i) as f64 * 0.37).sin())
                .collect()
        })
        .collect()
}
