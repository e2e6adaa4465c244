//! Memoized circuit evaluation.
//!
//! Each pass walks backwards from every output terminal, computing a gate
//! the first time it is reached and reusing the cached value afterwards.
//! The walk is a post-order traversal over an explicit stack, so arbitrarily
//! deep circuits evaluate without growing the call stack. The cache lives in
//! a scratch buffer owned by the [`Evaluator`] rather than the graph, so a
//! built [`Graph`] is never mutated by evaluation and independent evaluators
//! can share it.

use tracing::trace;

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::gate::{Gate, GateId};
use crate::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mark {
    #[default]
    Pending,
    /// Operands are being computed; reaching the gate again is a cycle.
    InProgress,
    Done,
}

/// Per-pass values and memoization marks, indexed by [`GateId`].
#[derive(Debug, Clone, Default)]
struct Scratch {
    values: Vec<bool>,
    marks: Vec<Mark>,
}

impl Scratch {
    fn new(len: usize) -> Self {
        Self {
            values: vec![false; len],
            marks: vec![Mark::Pending; len],
        }
    }

    fn reset(&mut self) {
        self.values.fill(false);
        self.marks.fill(Mark::Pending);
    }

    fn set(&mut self, id: GateId, value: bool) {
        self.values[id.index()] = value;
        self.marks[id.index()] = Mark::Done;
    }
}

/// Evaluates a graph against input assignments, one pass per call.
#[derive(Debug, Clone)]
pub struct Evaluator<'g> {
    graph: &'g Graph,
    scratch: Scratch,
    stack: Vec<GateId>,
    computed: usize,
}

impl<'g> Evaluator<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            scratch: Scratch::new(graph.gate_count()),
            stack: Vec::new(),
            computed: 0,
        }
    }

    /// Number of operator gates computed during the last pass.
    ///
    /// Each gate is computed at most once per pass regardless of how many
    /// outputs depend on it.
    pub fn computed_gates(&self) -> usize {
        self.computed
    }

    /// Run one pass.
    ///
    /// Declared inputs missing from `inputs` evaluate to `false`; nodes in
    /// `inputs` that are not declared inputs are ignored. The result maps
    /// each output terminal's source node to its value, in declaration
    /// order.
    ///
    /// # Errors
    ///
    /// Fails the whole pass if a gate depends on itself, or if a gate input
    /// was never linked (the graph came from a build that recorded errors).
    pub fn evaluate(&mut self, inputs: &Assignment) -> Result<Assignment, EvalError> {
        self.scratch.reset();
        self.computed = 0;
        self.seed(inputs);

        let graph = self.graph;
        let mut outputs = Assignment::new();
        for &id in graph.outputs() {
            let terminal = graph.gate(id);
            let source = link(terminal.input1_link, terminal)?;
            let value = self.resolve(source)?;
            outputs.insert(terminal.input1, value);
        }
        trace!(computed = self.computed, "pass complete");
        Ok(outputs)
    }

    /// Every declared input starts the pass computed, `false` unless assigned.
    fn seed(&mut self, inputs: &Assignment) {
        let graph = self.graph;
        for node in graph.input_nodes() {
            if let Some(id) = graph.input_gate(node) {
                self.scratch.set(id, inputs.get(node).unwrap_or(false));
            }
        }
    }

    /// Value of `root`, computing it and every gate it depends on that is
    /// not yet done.
    fn resolve(&mut self, root: GateId) -> Result<bool, EvalError> {
        let graph = self.graph;
        self.stack.clear();
        self.stack.push(root);

        while let Some(&id) = self.stack.last() {
            let gate = graph.gate(id);
            match self.scratch.marks[id.index()] {
                Mark::Done => {
                    self.stack.pop();
                }
                Mark::Pending => {
                    self.scratch.marks[id.index()] = Mark::InProgress;
                    for (_, operand) in gate.inputs() {
                        let operand = link(operand, gate)?;
                        match self.scratch.marks[operand.index()] {
                            Mark::Done => {}
                            Mark::Pending => self.stack.push(operand),
                            Mark::InProgress => {
                                return Err(EvalError::Cycle(graph.gate(operand).output));
                            }
                        }
                    }
                }
                Mark::InProgress => {
                    // Every operand was pushed above this gate and is done.
                    let value = self.combine(gate)?;
                    self.scratch.set(id, value);
                    self.computed += 1;
                    self.stack.pop();
                }
            }
        }
        Ok(self.scratch.values[root.index()])
    }

    fn combine(&self, gate: &Gate) -> Result<bool, EvalError> {
        let mut values = [false; 2];
        for (slot, (_, operand)) in values.iter_mut().zip(gate.inputs()) {
            *slot = self.scratch.values[link(operand, gate)?.index()];
        }
        Ok(gate.kind.combine(values[0], values[1]))
    }
}

/// Resolved operand handle, or the node that was never linked.
fn link(handle: Option<GateId>, gate: &Gate) -> Result<GateId, EvalError> {
    handle.ok_or_else(|| {
        let node = gate
            .inputs()
            .find(|&(_, link)| link.is_none())
            .map_or(gate.input1, |(node, _)| node);
        EvalError::Unlinked(node)
    })
}

/// Evaluate `graph` once.
pub fn evaluate(graph: &Graph, inputs: &Assignment) -> Result<Assignment, EvalError> {
    Evaluator::new(graph).evaluate(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_from_str;

    fn graph(text: &str) -> Graph {
        let outcome = build_from_str("test", text);
        assert!(outcome.is_good(), "{:?}", outcome.diagnostics);
        outcome.value
    }

    #[test]
    fn test_simple_and() {
        let graph = graph("IN: 1 2\nAND 1 2 3\nOUT: 3\n");

        let result = evaluate(&graph, &[(1, true), (2, true)].into()).unwrap();
        assert_eq!(result, Assignment::from([(3, true)]));

        let result = evaluate(&graph, &[(1, true), (2, false)].into()).unwrap();
        assert_eq!(result, Assignment::from([(3, false)]));
    }

    #[test]
    fn test_not() {
        let graph = graph("IN: 1\nNOT 1 2\nOUT: 2\n");
        let result = evaluate(&graph, &[(1, false)].into()).unwrap();
        assert_eq!(result.get(2), Some(true));
    }

    #[test]
    fn test_output_of_input_node() {
        let graph = graph("IN: 1\nOUT: 1\n");
        let result = evaluate(&graph, &[(1, true)].into()).unwrap();
        assert_eq!(result.get(1), Some(true));
    }

    #[test]
    fn test_outputs_in_declaration_order() {
        let graph = graph("IN: 1 2\nOR 1 2 3\nAND 1 2 4\nOUT: 4 3\n");
        let result = evaluate(&graph, &[(1, true), (2, false)].into()).unwrap();
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![(4, false), (3, true)]);
    }

    #[test]
    fn test_missing_input_defaults_to_false() {
        let graph = graph("IN: 1 2\nNOR 1 2 3\nOUT: 3\n");
        let mut evaluator = Evaluator::new(&graph);

        let result = evaluator.evaluate(&[(1, true), (2, true)].into()).unwrap();
        assert_eq!(result.get(3), Some(false));

        // Values from the previous pass must not carry over.
        let result = evaluator.evaluate(&Assignment::new()).unwrap();
        assert_eq!(result.get(3), Some(true));
    }

    #[test]
    fn test_shared_and_computed_once_per_pass() {
        // 3 = 1 AND 2 feeds both 4 and 5.
        let graph = graph("IN: 1 2\nAND 1 2 3\nNOT 3 4\nXOR 3 2 5\nOUT: 4 5 3\n");
        let mut evaluator = Evaluator::new(&graph);

        let result = evaluator.evaluate(&[(1, true), (2, true)].into()).unwrap();
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![(4, false), (5, false), (3, true)]
        );
        assert_eq!(evaluator.computed_gates(), 3);

        let result = evaluator.evaluate(&[(1, false), (2, true)].into()).unwrap();
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![(4, true), (5, true), (3, false)]
        );
        assert_eq!(evaluator.computed_gates(), 3);
    }

    #[test]
    fn test_unknown_input_nodes_ignored() {
        let graph = graph("IN: 1\nNOT 1 2\nOUT: 2\n");
        let result = evaluate(&graph, &[(2, false), (9, true)].into()).unwrap();
        assert_eq!(result.get(2), Some(true));
    }

    #[test]
    fn test_cycle_detected() {
        let graph = graph("IN: 1\nAND 1 3 2\nNOT 2 3\nOUT: 2\n");
        let err = evaluate(&graph, &[(1, true)].into()).unwrap_err();
        assert!(matches!(err, EvalError::Cycle(2 | 3)));
    }

    #[test]
    fn test_self_loop_detected() {
        let graph = graph("NOT 1 1\nOUT: 1\n");
        assert_eq!(
            evaluate(&graph, &Assignment::new()),
            Err(EvalError::Cycle(1))
        );
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 100_000u32;
        let mut text = String::from("IN: 1\n");
        for node in 1..=depth {
            text.push_str(&format!("NOT {} {}\n", node, node + 1));
        }
        text.push_str(&format!("OUT: {}\n", depth + 1));

        let graph = graph(&text);
        let mut evaluator = Evaluator::new(&graph);
        let result = evaluator.evaluate(&[(1, true)].into()).unwrap();
        assert_eq!(result.get(depth + 1), Some(true));
        assert_eq!(evaluator.computed_gates(), depth as usize);
    }

    #[test]
    fn test_same_operand_twice() {
        let graph = graph("IN: 1\nXOR 1 1 2\nAND 2 2 3\nOUT: 3\n");
        let mut evaluator = Evaluator::new(&graph);
        assert_eq!(evaluator.evaluate(&[(1, true)].into()).unwrap().get(3), Some(false));
        assert_eq!(evaluator.computed_gates(), 2);
    }

    #[test]
    fn test_unlinked_input_reported() {
        let outcome = build_from_str("test", "IN: 1\nAND 1 7 3\nOUT: 3\n");
        assert!(!outcome.is_good());
        assert_eq!(
            evaluate(&outcome.value, &[(1, true)].into()),
            Err(EvalError::Unlinked(7))
        );
    }
}
