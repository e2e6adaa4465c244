//! Line-oriented circuit builder.
//!
//! The builder consumes circuit-description lines one at a time, skipping
//! (and recording) lines it cannot parse. Gates may reference nodes that
//! are declared further down the file, so input links are only resolved in
//! [`Builder::finish`], once every producer is known.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::diagnostics::{Diagnostics, Outcome};
use crate::error::BuildError;
use crate::gate::{Gate, GateId, NodeId};
use crate::graph::Graph;
use crate::kind::GateKind;
use crate::limits::Limits;

/// One parsed line of a circuit description.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Declaration {
    Inputs(Vec<NodeId>),
    Outputs(Vec<NodeId>),
    Gate(Gate),
}

/// Integers read off the rest of a line the way formatted stream extraction
/// reads them: leading whitespace is skipped, then an optional sign and a run
/// of digits. The first text that cannot start an integer ends the sequence
/// for good, so `3x` yields 3 and stops.
struct Integers<'a> {
    rest: &'a str,
}

impl Iterator for Integers<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let text = self.rest.trim_start();
        let sign = usize::from(text.starts_with(['+', '-']));
        let digits = text[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len() - sign);
        let value = match digits {
            0 => None,
            _ => text[..sign + digits].parse().ok(),
        };
        self.rest = match value {
            Some(_) => &text[sign + digits..],
            None => "",
        };
        value
    }
}

/// Positive node number, or `None` for zero and negatives.
fn node(value: i64) -> Option<NodeId> {
    NodeId::try_from(value).ok().filter(|&n| n > 0)
}

/// Parse a non-blank line. `None` means the line is invalid.
fn parse_declaration(line: &str) -> Option<Declaration> {
    let line = line.trim_start();
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let kind = GateKind::from_keyword(keyword)?;
    let integers = Integers { rest };
    match kind {
        GateKind::Input => terminal_nodes(integers).map(Declaration::Inputs),
        GateKind::Output => terminal_nodes(integers).map(Declaration::Outputs),
        _ => {
            let operands = integers
                .take(kind.arity() + 1)
                .map(node)
                .collect::<Option<Vec<_>>>()?;
            Gate::operator(kind, &operands).map(Declaration::Gate)
        }
    }
}

/// Node list of an `IN:`/`OUT:` line. The list must be non-empty and every
/// number positive.
fn terminal_nodes(integers: Integers<'_>) -> Option<Vec<NodeId>> {
    let nodes = integers.map(node).collect::<Option<Vec<_>>>()?;
    (!nodes.is_empty()).then_some(nodes)
}

/// Incremental circuit builder.
#[derive(Debug)]
pub struct Builder {
    file: String,
    graph: Graph,
    diagnostics: Diagnostics,
    line_no: usize,
    limits: Limits,
    gates_exhausted: bool,
}

impl Builder {
    /// Create a builder with default limits. `file` labels diagnostics.
    pub fn new(file: impl Into<String>) -> Self {
        Self::with_limits(file, Limits::default())
    }

    pub fn with_limits(file: impl Into<String>, limits: Limits) -> Self {
        Self {
            file: file.into(),
            graph: Graph::new(),
            diagnostics: Diagnostics::new(),
            line_no: 0,
            limits,
            gates_exhausted: false,
        }
    }

    /// Feed the next line of the description.
    pub fn push_line(&mut self, line: &str) {
        self.line_no += 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return;
        }

        match parse_declaration(line) {
            Some(Declaration::Inputs(nodes)) => {
                for node in nodes {
                    self.declare(Gate::input(node));
                }
            }
            Some(Declaration::Outputs(nodes)) => {
                for node in nodes {
                    self.declare(Gate::output(node));
                }
            }
            Some(Declaration::Gate(gate)) => self.declare(gate),
            None => {
                debug!(file = %self.file, line = self.line_no, "skipping invalid line");
                self.diagnostics.error(BuildError::InvalidLine {
                    file: self.file.clone(),
                    line: self.line_no,
                });
            }
        }
    }

    /// Feed every line of `text`.
    pub fn push_str(&mut self, text: &str) {
        for line in text.lines() {
            self.push_line(line);
        }
    }

    fn declare(&mut self, gate: Gate) {
        if self.graph.gate_count() >= self.limits.max_gates {
            if !self.gates_exhausted {
                self.gates_exhausted = true;
                self.diagnostics.error(BuildError::MaxGatesExceeded {
                    file: self.file.clone(),
                    line: self.line_no,
                    limit: self.limits.max_gates,
                });
            }
            return;
        }
        self.graph.insert(gate);
    }

    /// Resolve input links and return the graph.
    ///
    /// The graph is returned even when errors were recorded; check
    /// [`Outcome::is_good`] before evaluating it.
    pub fn finish(mut self) -> Outcome<Graph> {
        self.link();
        info!(
            file = %self.file,
            gates = self.graph.gate_count(),
            inputs = self.graph.input_count(),
            outputs = self.graph.output_count(),
            good = self.diagnostics.is_good(),
            "circuit built"
        );
        Outcome::new(self.graph, self.diagnostics)
    }

    fn link(&mut self) {
        for id in self.graph.reachable_ids() {
            let gate = self.graph.gate(id);
            let (input1, input2) = (gate.input1, gate.input2);
            let link1 = self.resolve(input1);
            let link2 = self.resolve(input2);

            let gate = self.graph.gate_mut(id);
            gate.input1_link = link1;
            gate.input2_link = link2;
        }
    }

    fn resolve(&mut self, node: NodeId) -> Option<GateId> {
        if node == 0 {
            return None;
        }
        let producer = self.graph.producer(node);
        if producer.is_none() {
            debug!(file = %self.file, node, "unplugged input node");
            self.diagnostics.error(BuildError::UnpluggedNode {
                file: self.file.clone(),
                node,
            });
        }
        producer
    }
}

/// Build a circuit from in-memory text. `file` labels diagnostics.
pub fn build_from_str(file: &str, text: &str) -> Outcome<Graph> {
    let mut builder = Builder::new(file);
    builder.push_str(text);
    builder.finish()
}

/// Build a circuit from a description file.
pub fn build_from_file(path: impl AsRef<Path>, limits: Limits) -> Outcome<Graph> {
    let path = path.as_ref();
    let file = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(text) => {
            let mut builder = Builder::with_limits(file, limits);
            builder.push_str(&text);
            builder.finish()
        }
        Err(err) => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.error(BuildError::Unreadable {
                path: file,
                reason: err.to_string(),
            });
            Outcome::new(Graph::new(), diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Problem;

    fn errors(outcome: &Outcome<Graph>) -> Vec<Problem> {
        outcome.diagnostics.errors().cloned().collect()
    }

    #[test]
    fn test_simple_build() {
        let outcome = build_from_str("c", "IN: 1 2\nAND 1 2 3\nOUT: 3\n");
        assert!(outcome.is_good());

        let graph = outcome.value;
        assert_eq!(graph.input_nodes().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(graph.output_nodes().collect::<Vec<_>>(), vec![3]);
        assert_eq!(graph.gate_count(), 4);

        let and = graph.gate(graph.producer(3).unwrap());
        assert_eq!(and.kind, GateKind::And);
        assert_eq!(and.input1_link, graph.producer(1));
        assert_eq!(and.input2_link, graph.producer(2));
        let linked = |gate: &Gate| gate.inputs().all(|(_, link)| link.is_some());
        assert!(graph.gates().all(|(_, gate)| linked(gate)));
    }

    #[test]
    fn test_forward_reference() {
        let outcome = build_from_str("c", "OUT: 3\nNOT 2 3\nNOT 1 2\nIN: 1\n");
        assert!(outcome.is_good(), "{:?}", outcome.diagnostics);
    }

    #[test]
    fn test_missing_output_node_skips_line() {
        let outcome = build_from_str("c", "IN: 1 2\nXOR 1 2\n");
        assert!(!outcome.is_good());
        assert_eq!(
            errors(&outcome),
            vec![Problem::Build(BuildError::InvalidLine {
                file: "c".into(),
                line: 2,
            })]
        );
        assert_eq!(outcome.value.gate_count(), 2);
    }

    #[test]
    fn test_unknown_operator() {
        let outcome = build_from_str("c", "IN: 1\nBUF 1 2\nNOT 1 3\n");
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.value.producer(3).is_some());
    }

    #[test]
    fn test_non_positive_and_non_numeric_operands() {
        for line in ["NOT 0 2", "NOT -1 2", "AND 1 x 3", "OR 1 2 0", "NOT"] {
            let outcome = build_from_str("c", &format!("IN: 1\n{line}\n"));
            assert!(!outcome.is_good(), "{line} should be rejected");
        }
    }

    #[test]
    fn test_terminal_lines() {
        assert!(!build_from_str("c", "IN:\n").is_good());
        assert!(!build_from_str("c", "IN: 1 -2\n").is_good());
        assert!(!build_from_str("c", "OUT: 0\n").is_good());

        // Reading stops at the first text that cannot start an integer.
        let outcome = build_from_str("c", "IN: 1 2 # rest\n");
        assert!(outcome.is_good());
        assert_eq!(outcome.value.input_count(), 2);

        let outcome = build_from_str("c", "IN: 1 2x 3\n");
        assert!(outcome.is_good());
        assert_eq!(outcome.value.input_nodes().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_operand_suffix_after_last_operand() {
        let outcome = build_from_str("c", "IN: 1 2\nAND 1 2 3x\nOUT: 3\n");
        assert!(outcome.is_good(), "{:?}", outcome.diagnostics);
        let graph = outcome.value;
        assert_eq!(graph.gate(graph.producer(3).unwrap()).kind, GateKind::And);

        // A suffix before the last operand leaves the line short.
        let outcome = build_from_str("c", "IN: 1 2\nAND 1x 2 3\n");
        assert_eq!(
            errors(&outcome),
            vec![Problem::Build(BuildError::InvalidLine {
                file: "c".into(),
                line: 2,
            })]
        );
    }

    #[test]
    fn test_integers_follow_stream_extraction() {
        let read = |text| Integers { rest: text }.collect::<Vec<_>>();
        assert_eq!(read("  1\t+2 -3"), vec![1, 2, -3]);
        assert_eq!(read("4 5x 6"), vec![4, 5]);
        assert_eq!(read("- 1"), Vec::<i64>::new());
        assert_eq!(read("99999999999999999999 1"), Vec::<i64>::new());
        assert_eq!(read(""), Vec::<i64>::new());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let outcome = build_from_str("c", "\r\nIN: 1\r\n\n   \nNOT 1 2\r\nOUT: 2\r\n");
        assert!(outcome.is_good());
        assert_eq!(outcome.value.gate_count(), 3);
    }

    #[test]
    fn test_unplugged_input() {
        let outcome = build_from_str("c", "IN: 1\nAND 1 7 3\nOUT: 3\nOUT: 9\n");
        assert_eq!(
            errors(&outcome),
            vec![
                Problem::Build(BuildError::UnpluggedNode {
                    file: "c".into(),
                    node: 7
                }),
                Problem::Build(BuildError::UnpluggedNode {
                    file: "c".into(),
                    node: 9
                }),
            ]
        );
        let graph = outcome.value;
        let and = graph.gate(graph.producer(3).unwrap());
        assert!(and.input1_link.is_some());
        assert!(and.input2_link.is_none());
    }

    #[test]
    fn test_duplicate_producer_last_write_wins() {
        let outcome = build_from_str("c", "IN: 1 2\nAND 1 2 3\nOR 1 2 3\nOUT: 3\n");
        assert!(outcome.is_good());
        let graph = outcome.value;
        assert_eq!(graph.gate(graph.producer(3).unwrap()).kind, GateKind::Or);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let outcome = build_from_str("c", "IN: 1\n\nFOO 1 2\n");
        assert_eq!(
            errors(&outcome),
            vec![Problem::Build(BuildError::InvalidLine {
                file: "c".into(),
                line: 3,
            })]
        );
    }

    #[test]
    fn test_gate_limit_reported_once() {
        let mut builder = Builder::with_limits("c", Limits::new(2));
        builder.push_str("IN: 1 2 3\nNOT 1 4\n");
        let outcome = builder.finish();
        assert_eq!(outcome.value.gate_count(), 2);
        assert_eq!(outcome.diagnostics.errors().count(), 1);
    }

    #[test]
    fn test_unreadable_file() {
        let outcome = build_from_file("/nonexistent/circuit.txt", Limits::default());
        assert!(!outcome.is_good());
        assert!(matches!(
            outcome.diagnostics.errors().next(),
            Some(Problem::Build(BuildError::Unreadable { .. }))
        ));
    }
}
