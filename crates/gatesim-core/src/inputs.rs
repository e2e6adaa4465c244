//! Input assignment files.
//!
//! One assignment per non-blank line, written as whitespace-separated
//! `<node>:<0|1>` tokens. Problems with individual tokens are warnings:
//! the token is skipped and the rest of the line still applies. Each
//! assignment is stored in ascending node order whatever the token order.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::assignment::Assignment;
use crate::diagnostics::{Diagnostics, Outcome};
use crate::error::InputError;
use crate::gate::{parse_node, NodeId};
use crate::graph::Graph;

/// Split a `<node>:<0|1>` token.
fn parse_token(token: &str) -> Option<(NodeId, bool)> {
    let (node, value) = token.split_once(':')?;
    let value = match value {
        "0" => false,
        "1" => true,
        _ => return None,
    };
    Some((parse_node(node)?, value))
}

/// Read assignments for `graph` from in-memory text. `file` labels diagnostics.
pub fn read_assignments(graph: &Graph, file: &str, text: &str) -> Outcome<Vec<Assignment>> {
    let mut diagnostics = Diagnostics::new();
    let mut sets = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut set = Assignment::new();
        for token in line.split_whitespace() {
            let Some((node, value)) = parse_token(token) else {
                diagnostics.warning(InputError::MalformedToken {
                    file: file.to_string(),
                    line: line_no,
                    token: token.to_string(),
                });
                continue;
            };
            if !graph.is_input(node) {
                diagnostics.warning(InputError::UnknownNode {
                    file: file.to_string(),
                    line: line_no,
                    node,
                });
                continue;
            }
            set.insert(node, value);
        }
        set.sort_by_node();

        let missing: Vec<NodeId> = graph
            .input_nodes()
            .filter(|&node| !set.contains(node))
            .collect();
        if !missing.is_empty() {
            debug!(file, line = line_no, ?missing, "inputs defaulted to 0");
            diagnostics.warning(InputError::MissingInputs {
                file: file.to_string(),
                line: line_no,
                nodes: missing,
            });
        }
        sets.push(set);
    }

    info!(file, sets = sets.len(), "inputs read");
    Outcome::new(sets, diagnostics)
}

/// Read assignments for `graph` from a file.
pub fn read_assignments_from_file(
    graph: &Graph,
    path: impl AsRef<Path>,
) -> Outcome<Vec<Assignment>> {
    let path = path.as_ref();
    let file = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(text) => read_assignments(graph, &file, &text),
        Err(err) => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.error(InputError::Unreadable {
                path: file,
                reason: err.to_string(),
            });
            Outcome::new(Vec::new(), diagnostics)
        }
    }
}
