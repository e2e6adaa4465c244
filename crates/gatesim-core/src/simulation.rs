//! Build, read, evaluate, write.

use std::path::Path;

use tracing::info;

use crate::assignment::Assignment;
use crate::builder::{build_from_file, Builder};
use crate::diagnostics::{Diagnostics, Outcome};
use crate::eval::Evaluator;
use crate::graph::Graph;
use crate::inputs::{read_assignments, read_assignments_from_file};
use crate::limits::Limits;
use crate::output;

/// A built circuit together with the input sets read for it and the
/// output sets evaluated from them.
///
/// Each phase returns its own [`Diagnostics`]; callers should stop when a
/// phase is not good.
#[derive(Debug, Clone)]
pub struct Simulation {
    graph: Graph,
    input_sets: Vec<Assignment>,
    output_sets: Vec<Assignment>,
}

impl Simulation {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            input_sets: Vec::new(),
            output_sets: Vec::new(),
        }
    }

    /// Build from a circuit description file.
    pub fn build(path: impl AsRef<Path>, limits: Limits) -> Outcome<Self> {
        build_from_file(path, limits).map(Self::new)
    }

    /// Build from in-memory text. `file` labels diagnostics.
    pub fn build_str(file: &str, text: &str, limits: Limits) -> Outcome<Self> {
        let mut builder = Builder::with_limits(file, limits);
        builder.push_str(text);
        builder.finish().map(Self::new)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn input_sets(&self) -> &[Assignment] {
        &self.input_sets
    }

    pub fn output_sets(&self) -> &[Assignment] {
        &self.output_sets
    }

    /// Queue an input set for the next [`evaluate`](Self::evaluate).
    pub fn push_inputs(&mut self, inputs: Assignment) {
        self.input_sets.push(inputs);
    }

    /// Append the input sets read from a file.
    pub fn read_inputs(&mut self, path: impl AsRef<Path>) -> Diagnostics {
        let outcome = read_assignments_from_file(&self.graph, path);
        self.input_sets.extend(outcome.value);
        outcome.diagnostics
    }

    /// Append the input sets read from in-memory text.
    pub fn read_inputs_str(&mut self, file: &str, text: &str) -> Diagnostics {
        let outcome = read_assignments(&self.graph, file, text);
        self.input_sets.extend(outcome.value);
        outcome.diagnostics
    }

    /// Evaluate every input set that has no output set yet.
    ///
    /// Stops at the first failing pass, leaving the output sets one-to-one
    /// with the input sets that were evaluated successfully.
    pub fn evaluate(&mut self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let mut evaluator = Evaluator::new(&self.graph);
        let pending = &self.input_sets[self.output_sets.len()..];

        for inputs in pending {
            match evaluator.evaluate(inputs) {
                Ok(outputs) => self.output_sets.push(outputs),
                Err(err) => {
                    diagnostics.error(err);
                    break;
                }
            }
        }
        info!(
            evaluated = self.output_sets.len(),
            total = self.input_sets.len(),
            "evaluation finished"
        );
        diagnostics
    }

    /// Rendered output file contents.
    pub fn render(&self) -> String {
        output::render(&self.input_sets, &self.output_sets)
    }

    /// Write the evaluated sets to `path`.
    pub fn write_outputs(&self, path: impl AsRef<Path>) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if let Err(err) = output::write_file(path, &self.input_sets, &self.output_sets) {
            diagnostics.error(err);
        }
        diagnostics
    }
}
