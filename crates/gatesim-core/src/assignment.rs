//! Node-to-value assignments.

use std::fmt;

use indexmap::IndexMap;

use crate::gate::NodeId;

/// Ordered mapping from node number to logic value.
///
/// Entries keep the order in which nodes were first inserted; inserting a
/// node again replaces its value in place. Two assignments are equal only
/// if they list the same entries in the same order.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    entries: IndexMap<NodeId, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `node` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, node: NodeId, value: bool) -> Option<bool> {
        self.entries.insert(node, value)
    }

    pub fn get(&self, node: NodeId) -> Option<bool> {
        self.entries.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reorder entries by ascending node number.
    pub fn sort_by_node(&mut self) {
        self.entries.sort_keys();
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, bool)> + '_ {
        self.entries.iter().map(|(&node, &value)| (node, value))
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Assignment {}

impl FromIterator<(NodeId, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (NodeId, bool)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (node, value) in iter {
            assignment.insert(node, value);
        }
        assignment
    }
}

impl<const N: usize> From<[(NodeId, bool); N]> for Assignment {
    fn from(entries: [(NodeId, bool); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// `<node>:<0|1>` pairs separated by single spaces.
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (node, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", node, u8::from(value))?;
        }
        Ok(())
    }
}
