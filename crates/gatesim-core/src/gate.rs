//! Gate records.

use crate::kind::GateKind;

/// Wire identifier. Zero means "not connected" and is never a valid reference.
pub type NodeId = u32;

/// Handle of a gate inside a [`Graph`](crate::Graph) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(u32);

impl GateId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the gate in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single circuit element and its connections.
///
/// `input1`/`input2` hold the node numbers the gate reads and are zero when
/// the kind does not use them. Output terminals produce no node, so their
/// `output` is zero and `input1` names the exposed source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub kind: GateKind,
    pub input1: NodeId,
    pub input2: NodeId,
    pub output: NodeId,
    /// Gate producing `input1`, set during link resolution.
    pub input1_link: Option<GateId>,
    /// Gate producing `input2`, set during link resolution.
    pub input2_link: Option<GateId>,
}

impl Gate {
    fn with_nodes(kind: GateKind, input1: NodeId, input2: NodeId, output: NodeId) -> Self {
        Self {
            kind,
            input1,
            input2,
            output,
            input1_link: None,
            input2_link: None,
        }
    }

    /// Input terminal driving `node`.
    pub fn input(node: NodeId) -> Self {
        Self::with_nodes(GateKind::Input, 0, 0, node)
    }

    /// Output terminal exposing `source`.
    pub fn output(source: NodeId) -> Self {
        Self::with_nodes(GateKind::Output, source, 0, 0)
    }

    /// Operator gate from its operand nodes, the produced node last.
    ///
    /// Returns `None` if `kind` is a terminal, if fewer operands than the
    /// kind requires are given, or if a required operand is zero. Surplus
    /// operands are ignored.
    pub fn operator(kind: GateKind, operands: &[NodeId]) -> Option<Self> {
        if kind.is_terminal() {
            return None;
        }
        let needed = kind.arity() + 1;
        let operands = operands.get(..needed)?;
        if operands.contains(&0) {
            return None;
        }
        let gate = match *operands {
            [input, output] => Self::with_nodes(kind, input, 0, output),
            [input1, input2, output] => Self::with_nodes(kind, input1, input2, output),
            _ => return None,
        };
        Some(gate)
    }

    /// Node numbers this gate reads, paired with their resolved links.
    pub fn inputs(&self) -> impl Iterator<Item = (NodeId, Option<GateId>)> + '_ {
        [(self.input1, self.input1_link), (self.input2, self.input2_link)]
            .into_iter()
            .take(self.kind.arity())
    }
}

/// Parse a node number token. Zero, negative and non-numeric tokens yield `None`.
pub fn parse_node(token: &str) -> Option<NodeId> {
    match token.parse::<NodeId>() {
        Ok(0) | Err(_) => None,
        Ok(node) => Some(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_operator_takes_last_operand_as_output() {
        let gate = Gate::operator(GateKind::Not, &[4, 9]).unwrap();
        assert_eq!((gate.input1, gate.input2, gate.output), (4, 0, 9));
    }

    #[test]
    fn test_binary_operator() {
        let gate = Gate::operator(GateKind::Nand, &[1, 2, 3]).unwrap();
        assert_eq!((gate.input1, gate.input2, gate.output), (1, 2, 3));
        assert_eq!(gate.inputs().collect::<Vec<_>>(), vec![(1, None), (2, None)]);
    }

    #[test]
    fn test_missing_operand_rejected() {
        assert_eq!(Gate::operator(GateKind::Xor, &[1, 2]), None);
        assert_eq!(Gate::operator(GateKind::Not, &[1]), None);
    }

    #[test]
    fn test_zero_operand_rejected() {
        assert_eq!(Gate::operator(GateKind::And, &[1, 0, 3]), None);
    }

    #[test]
    fn test_surplus_operands_ignored() {
        let gate = Gate::operator(GateKind::Not, &[1, 2, 3]).unwrap();
        assert_eq!(gate.output, 2);
    }

    #[test]
    fn test_terminals_are_not_operators() {
        assert_eq!(Gate::operator(GateKind::Input, &[1, 2]), None);
        assert_eq!(Gate::operator(GateKind::Output, &[1, 2]), None);
    }

    #[test]
    fn test_input_gate_reads_nothing() {
        let gate = Gate::input(7);
        assert_eq!(gate.inputs().count(), 0);
    }

    #[test]
    fn test_parse_node() {
        assert_eq!(parse_node("12"), Some(12));
        assert_eq!(parse_node("0"), None);
        assert_eq!(parse_node("-3"), None);
        assert_eq!(parse_node("x"), None);
    }
}
