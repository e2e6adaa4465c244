//! gatesim CLI
//!
//! Simulates a combinational circuit for every input set in a file:
//!
//! ```text
//! gatesim -u circuit.txt -i inputs.txt -o outputs.txt
//! ```
//!
//! Diagnostics go to stderr. Set `RUST_LOG` (e.g. `RUST_LOG=gatesim_core=debug`)
//! for tracing output.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{ensure, Result};
use clap::Parser;
use gatesim_core::{Diagnostics, Limits, Simulation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gatesim")]
#[command(about = "Simulate a combinational logic circuit")]
#[command(version)]
struct Cli {
    /// Read circuit structure from <FILE>
    #[arg(short = 'u', long = "circuit", value_name = "FILE")]
    circuit: PathBuf,
    /// Read input sets from <FILE>
    #[arg(short, long, value_name = "FILE")]
    inputs: PathBuf,
    /// Write evaluated outputs to <FILE>
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
    /// Maximum number of gates (terminals included) the circuit may declare
    #[arg(long, value_name = "N")]
    max_gates: Option<usize>,
}

impl Cli {
    fn limits(&self) -> Limits {
        self.max_gates.map_or_else(Limits::default, Limits::new)
    }
}

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
    tracing::debug!(
        errors = diagnostics.errors().count(),
        warnings = diagnostics.warnings().count(),
        "phase finished"
    );
}

fn run(cli: &Cli) -> Result<()> {
    let outcome = Simulation::build(&cli.circuit, cli.limits());
    report(&outcome.diagnostics);
    ensure!(outcome.is_good(), "circuit {} is invalid", cli.circuit.display());
    let mut sim = outcome.value;

    let diagnostics = sim.read_inputs(&cli.inputs);
    report(&diagnostics);
    ensure!(diagnostics.is_good(), "could not read inputs");

    let diagnostics = sim.evaluate();
    report(&diagnostics);
    ensure!(diagnostics.is_good(), "evaluation failed");

    let diagnostics = sim.write_outputs(&cli.output);
    report(&diagnostics);
    ensure!(diagnostics.is_good(), "could not write outputs");

    tracing::info!(
        gates = sim.graph().gate_count(),
        sets = sim.input_sets().len(),
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
