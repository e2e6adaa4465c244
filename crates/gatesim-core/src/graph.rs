//! Gate arena and node index.

use std::collections::BTreeMap;

use crate::gate::{Gate, GateId, NodeId};
use crate::kind::GateKind;

/// A built circuit.
///
/// Gates live in an arena and refer to each other through [`GateId`]
/// handles, so the graph owns every gate exactly once and has no reference
/// cycles even when the netlist itself is cyclic.
///
/// - `by_node`: produced node number → gate. A later producer of the same
///   node replaces an earlier one; the earlier gate stays in the arena but
///   is no longer reachable by number.
/// - `input_gates`: the `IN:` declarations, by node number.
/// - `outputs`: the `OUT:` declarations, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    gates: Vec<Gate>,
    by_node: BTreeMap<NodeId, GateId>,
    input_gates: BTreeMap<NodeId, GateId>,
    outputs: Vec<GateId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a gate and index it by the node it produces.
    pub(crate) fn insert(&mut self, gate: Gate) -> GateId {
        let id = GateId::new(self.gates.len());
        match gate.kind {
            GateKind::Output => self.outputs.push(id),
            GateKind::Input => {
                self.input_gates.insert(gate.output, id);
                self.by_node.insert(gate.output, id);
            }
            _ => {
                self.by_node.insert(gate.output, id);
            }
        }
        self.gates.push(gate);
        id
    }

    pub(crate) fn gate_mut(&mut self, id: GateId) -> &mut Gate {
        &mut self.gates[id.index()]
    }

    /// Gates that link resolution must visit: every indexed producer, in
    /// node order, then every output terminal.
    pub(crate) fn reachable_ids(&self) -> Vec<GateId> {
        self.by_node
            .values()
            .chain(self.outputs.iter())
            .copied()
            .collect()
    }

    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.index()]
    }

    /// All stored gates, including shadowed duplicates.
    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates
            .iter()
            .enumerate()
            .map(|(i, gate)| (GateId::new(i), gate))
    }

    /// Total number of stored gates (terminals included).
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Gate currently producing `node`.
    pub fn producer(&self, node: NodeId) -> Option<GateId> {
        self.by_node.get(&node).copied()
    }

    /// Input terminal declared for `node`.
    pub fn input_gate(&self, node: NodeId) -> Option<GateId> {
        self.input_gates.get(&node).copied()
    }

    pub fn is_input(&self, node: NodeId) -> bool {
        self.input_gates.contains_key(&node)
    }

    /// Declared input nodes, ascending.
    pub fn input_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.input_gates.keys().copied()
    }

    /// Output terminals in declaration order.
    pub fn outputs(&self) -> &[GateId] {
        &self.outputs
    }

    /// Source nodes exposed by the output terminals, in declaration order.
    pub fn output_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outputs.iter().map(|&id| self.gate(id).input1)
    }

    pub fn input_count(&self) -> usize {
        self.input_gates.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        assert_eq!(graph.gate_count(), 0);
        assert_eq!(graph.output_count(), 0);
        assert!(graph.reachable_ids().is_empty());
    }

    #[test]
    fn test_inputs_are_also_producers() {
        let mut graph = Graph::new();
        let id = graph.insert(Gate::input(4));
        assert_eq!(graph.producer(4), Some(id));
        assert_eq!(graph.input_gate(4), Some(id));
        assert!(graph.is_input(4));
    }

    #[test]
    fn test_outputs_are_not_producers() {
        let mut graph = Graph::new();
        graph.insert(Gate::output(9));
        assert_eq!(graph.producer(9), None);
        assert_eq!(graph.output_nodes().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_later_producer_shadows_earlier() {
        let mut graph = Graph::new();
        let first = graph.insert(Gate::operator(GateKind::Not, &[1, 3]).unwrap());
        let second = graph.insert(Gate::operator(GateKind::Or, &[1, 2, 3]).unwrap());
        assert_ne!(first, second);
        assert_eq!(graph.producer(3), Some(second));
        assert_eq!(graph.gate_count(), 2);
        assert_eq!(graph.reachable_ids(), vec![second]);
    }

    #[test]
    fn test_input_nodes_sorted() {
        let mut graph = Graph::new();
        graph.insert(Gate::input(5));
        graph.insert(Gate::input(2));
        assert_eq!(graph.input_nodes().collect::<Vec<_>>(), vec![2, 5]);
    }
}
