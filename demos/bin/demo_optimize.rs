//! Circuit Optimization Demo
//!
//! Builds a GHZ preparation padded with cancelling gate pairs and runs it
//! through the standard pass pipeline.

use std::path::PathBuf;

use clap::Parser;

use qsim_compile::{Optimizer, PassManager};
use qsim_demos::{print_header, print_info, print_result, print_section, print_success, redundant_ghz};
use qsim_ir::Circuit;
use qsim_runtime::{TracingConfig, acceleration_factor};

#[derive(Parser, Debug)]
#[command(name = "demo-optimize")]
#[command(about = "Cancel redundant gates and compact circuit depth")]
struct Args {
    /// Number of qubits
    #[arg(short = 'n', long, default_value = "4")]
    qubits: u32,

    /// Cancelling pairs inserted per qubit
    #[arg(short, long, default_value = "3")]
    padding: usize,

    /// Read the circuit from a JSON file instead of generating one
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the optimized circuit as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    TracingConfig::from_env().init()?;

    print_header("Circuit Optimization Demo");

    let circuit = match &args.input {
        Some(path) => Circuit::from_json(&std::fs::read_to_string(path)?)?,
        None => redundant_ghz(args.qubits, args.padding)?,
    };

    print_section("Pipeline");
    let manager = PassManager::standard();
    for name in manager.pass_names() {
        print_info(name);
    }

    print_section("Input");
    print_result("Qubits", circuit.num_qubits());
    print_result("Gates", circuit.gate_count());
    print_result("Depth", circuit.depth());
    print_result("Fidelity", format!("{:.6}", circuit.fidelity()));

    let optimizer = Optimizer::with_pass_manager(manager);
    let (optimized, report) = optimizer.optimize_with_report(&circuit)?;

    print_section("Output");
    print_result("Gates", report.gates_after);
    print_result("Depth", report.depth_after);
    print_result("Fidelity", format!("{:.6}", optimized.fidelity()));
    print_result("Cancelled", report.cancelled);
    print_result(
        "Acceleration factor",
        format!(
            "{:.2} -> {:.2}",
            acceleration_factor(circuit.num_qubits(), report.depth_before),
            acceleration_factor(optimized.num_qubits(), report.depth_after)
        ),
    );

    if let Some(path) = &args.output {
        std::fs::write(path, optimized.to_json()?)?;
        print_info(&format!("Wrote {}", path.display()));
    }

    print_success(&format!(
        "Removed {} gates, depth reduced by {}",
        report.gates_removed(),
        report.depth_reduction()
    ));
    Ok(())
}
