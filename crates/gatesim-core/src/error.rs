//! Error types for circuit construction, input reading, evaluation and output.

use thiserror::Error;

use crate::gate::NodeId;

/// Problems found while building a circuit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Circuit description could not be read.
    #[error("error: couldn't open circuit file {path} for reading: {reason}")]
    Unreadable { path: String, reason: String },

    /// Line with an unknown operator or bad node numbers.
    #[error("{file}: line: {line} warning: omitting line - incorrect data")]
    InvalidLine { file: String, line: usize },

    /// A gate reads a node that nothing produces.
    #[error("{file}: error: unplugged input node: {node}")]
    UnpluggedNode { file: String, node: NodeId },

    /// Maximum gate count exceeded.
    #[error("{file}: line: {line} error: maximum gates exceeded ({limit})")]
    MaxGatesExceeded {
        file: String,
        line: usize,
        limit: usize,
    },
}

/// Problems found while reading input assignments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Input file could not be read.
    #[error("error: couldn't open inputs file {path} for reading: {reason}")]
    Unreadable { path: String, reason: String },

    /// Token names a node that is not a declared input.
    #[error("{file}: line: {line} warning: incorrect input node: {node}")]
    UnknownNode {
        file: String,
        line: usize,
        node: NodeId,
    },

    /// Token is not of the form `<node>:<0|1>`.
    #[error("{file}: line: {line} warning: malformed input token: {token}")]
    MalformedToken {
        file: String,
        line: usize,
        token: String,
    },

    /// Declared inputs absent from an assignment.
    #[error(
        "{file}: line: {line} warning: following inputs have no defined value and will be defaulted to 0: {}",
        join_nodes(.nodes)
    )]
    MissingInputs {
        file: String,
        line: usize,
        nodes: Vec<NodeId>,
    },
}

/// Errors that abort a single evaluation pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A gate was reached again while its own value was being computed.
    #[error("cycle detected through node {0}")]
    Cycle(NodeId),

    /// A gate input was never linked to its producer.
    #[error("unlinked input node {0}")]
    Unlinked(NodeId),
}

/// Errors writing evaluated outputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("error: couldn't open output file {path} for writing: {reason}")]
    Unwritable { path: String, reason: String },
}

fn join_nodes(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
