//! gatesim: combinational logic circuit simulator.
//!
//! # Overview
//!
//! A circuit is a flat netlist of gates connected by numbered nodes:
//!
//! ```text
//! IN: 1 2
//! AND 1 2 3
//! OUT: 3
//! ```
//!
//! The [`Builder`] turns such a description into a [`Graph`], recording a
//! diagnostic for every line it has to skip and every node reference it
//! cannot resolve. The [`Evaluator`] then computes the outputs for each
//! input [`Assignment`], memoizing every gate's value for the duration of a
//! pass so shared sub-circuits are evaluated once.
//!
//! Circuits must be acyclic. Feedback loops are reported as
//! [`EvalError::Cycle`] when evaluated.
//!
//! # Example
//!
//! ```
//! use gatesim_core::{build_from_str, evaluate, Assignment};
//!
//! let outcome = build_from_str("adder", "IN: 1 2\nXOR 1 2 3\nAND 1 2 4\nOUT: 3 4\n");
//! assert!(outcome.is_good());
//! let graph = outcome.value;
//!
//! let outputs = evaluate(&graph, &Assignment::from([(1, true), (2, true)])).unwrap();
//! assert_eq!(outputs.to_string(), "3:0 4:1");
//! ```
//!
//! # Phases
//!
//! [`Simulation`] strings the phases together the way the command-line
//! front end uses them: build, read inputs, evaluate, write outputs. Each
//! phase reports [`Diagnostics`] instead of stopping at the first problem.
//!
//! ```
//! use gatesim_core::{Limits, Simulation};
//!
//! let mut sim = Simulation::build_str("not", "IN: 1\nNOT 1 2\nOUT: 2\n", Limits::default()).value;
//! let warnings = sim.read_inputs_str("inputs", "1:0\n");
//! assert!(warnings.is_empty());
//! assert!(sim.evaluate().is_good());
//! assert_eq!(sim.render(), "IN: 1:0 OUT: 2:1\n");
//! ```

pub mod assignment;
pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod gate;
pub mod graph;
pub mod inputs;
pub mod kind;
pub mod limits;
pub mod output;
pub mod simulation;

pub use assignment::Assignment;
pub use builder::{build_from_file, build_from_str, Builder};
pub use diagnostics::{Diagnostic, Diagnostics, Outcome, Problem, Severity};
pub use error::{BuildError, EvalError, InputError, WriteError};
pub use eval::{evaluate, Evaluator};
pub use gate::{Gate, GateId, NodeId};
pub use graph::Graph;
pub use inputs::{read_assignments, read_assignments_from_file};
pub use kind::GateKind;
pub use limits::Limits;
pub use simulation::Simulation;
