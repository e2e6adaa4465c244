//! Resource limits for building circuits.

/// Resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of gates (terminals included) in a circuit.
    pub max_gates: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_gates: 1 << 20 }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_gates: usize) -> Self {
        Self { max_gates }
    }
}
