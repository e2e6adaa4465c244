//! Output file rendering.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::assignment::Assignment;
use crate::error::WriteError;

/// Render one result line: `IN: <node>:<v> ... OUT: <node>:<v> ...`.
pub fn format_line(inputs: &Assignment, outputs: &Assignment) -> String {
    let mut line = String::from("IN:");
    for (label, set) in [("", inputs), (" OUT:", outputs)] {
        line.push_str(label);
        if !set.is_empty() {
            line.push(' ');
            line.push_str(&set.to_string());
        }
    }
    line
}

/// Write one line per evaluated pair of sets.
pub fn write_results<W: Write>(
    mut out: W,
    input_sets: &[Assignment],
    output_sets: &[Assignment],
) -> io::Result<()> {
    for (inputs, outputs) in input_sets.iter().zip(output_sets) {
        writeln!(out, "{}", format_line(inputs, outputs))?;
    }
    out.flush()
}

/// Render all results as a string.
pub fn render(input_sets: &[Assignment], output_sets: &[Assignment]) -> String {
    input_sets
        .iter()
        .zip(output_sets)
        .map(|(inputs, outputs)| format_line(inputs, outputs) + "\n")
        .collect()
}

/// Write all results to `path`, replacing its contents.
pub fn write_file(
    path: impl AsRef<Path>,
    input_sets: &[Assignment],
    output_sets: &[Assignment],
) -> Result<(), WriteError> {
    let path = path.as_ref();
    let unwritable = |err: io::Error| WriteError::Unwritable {
        path: path.display().to_string(),
        reason: err.to_string(),
    };
    let file = File::create(path).map_err(unwritable)?;
    write_results(BufWriter::new(file), input_sets, output_sets).map_err(unwritable)
}
