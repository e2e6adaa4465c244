//! Gate kinds and their truth tables.
//!
//! The set of kinds is closed: every keyword accepted in a circuit
//! description maps onto exactly one [`GateKind`], and evaluation
//! dispatches through a single exhaustive match.

use std::fmt;

/// Kind of a circuit element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// External input terminal: `IN:`
    Input,
    /// External output terminal: `OUT:`
    Output,
    /// Negation: ¬A (`NOT` or `NEG`)
    Not,
    /// A ∧ B
    And,
    /// ¬(A ∧ B)
    Nand,
    /// A ∨ B
    Or,
    /// ¬(A ∨ B)
    Nor,
    /// A ⊕ B
    Xor,
    /// ¬(A ⊕ B)
    Xnor,
}

impl GateKind {
    /// Look up the kind declared by a circuit-file keyword.
    ///
    /// Keywords are case-sensitive. `NEG` is an alias of `NOT`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "IN:" => Some(GateKind::Input),
            "OUT:" => Some(GateKind::Output),
            "NOT" | "NEG" => Some(GateKind::Not),
            "AND" => Some(GateKind::And),
            "NAND" => Some(GateKind::Nand),
            "OR" => Some(GateKind::Or),
            "NOR" => Some(GateKind::Nor),
            "XOR" => Some(GateKind::Xor),
            "XNOR" => Some(GateKind::Xnor),
            _ => None,
        }
    }

    /// Canonical keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            GateKind::Input => "IN:",
            GateKind::Output => "OUT:",
            GateKind::Not => "NOT",
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        }
    }

    /// Number of input node references a gate of this kind reads.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Input => 0,
            GateKind::Output | GateKind::Not => 1,
            GateKind::And
            | GateKind::Nand
            | GateKind::Or
            | GateKind::Nor
            | GateKind::Xor
            | GateKind::Xnor => 2,
        }
    }

    /// Whether this kind is a terminal (`IN:` or `OUT:`) rather than an operator.
    pub fn is_terminal(self) -> bool {
        matches!(self, GateKind::Input | GateKind::Output)
    }

    /// Combine evaluated operands.
    ///
    /// Unary kinds ignore `b`. Terminals pass `a` through unchanged.
    #[inline]
    pub fn combine(self, a: bool, b: bool) -> bool {
        match self {
            GateKind::Input | GateKind::Output => a,
            GateKind::Not => !a,
            GateKind::And => a && b,
            GateKind::Nand => !(a && b),
            GateKind::Or => a || b,
            GateKind::Nor => !(a || b),
            GateKind::Xor => a ^ b,
            GateKind::Xnor => !(a ^ b),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
