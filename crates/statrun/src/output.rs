//! Output formatting helpers for the `statrun` CLI.

use serde::Serialize;
use statrun_core::schema::{ParameterSpec, SchemaForm};
use statrun_core::Operation;
use std::io::{self, Write};

/// JSON view of one catalog operation.
#[derive(Serialize)]
pub struct OperationView<'a> {
    pub name: &'a str,
    pub signature: String,
    pub form: SchemaForm,
    pub params: &'a [ParameterSpec],
}

impl<'a> OperationView<'a> {
    pub fn from_operation(operation: &'a Operation) -> Self {
        Self {
            name: operation.name(),
            signature: operation.signature(),
            form: operation.schema().form(),
            params: operation.schema().params(),
        }
    }
}

/// Print a value as pretty-printed JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", format_row(headers, &widths));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(handle, "{}", format_row(&cells, &widths));
    }
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_are_padded_to_column_width() {
        let widths = [4, 5, 3];
        assert_eq!(format_row(&["x", "int", "no"], &widths), "x     int    no");
        assert_eq!(format_row(&["NAME", "TYPE", ""], &widths), "NAME  TYPE");
    }
}
