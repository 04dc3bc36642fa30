//! CSV reading at the file boundary.
//!
//! Encoding and dialect detection are the caller's concern; this reader
//! expects UTF-8 comma-separated input and hands the core clean rows with
//! their source line numbers.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use apc_model::{Dataset, SourceRow};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// True if the row reads like a header: every non-empty cell carries some
/// alphabetic text and nothing parses as a plain number.
fn is_header_like(row: &[String]) -> bool {
    let mut saw_alpha = false;
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.parse::<f64>().is_ok() {
            return false;
        }
        if trimmed.chars().any(|ch| ch.is_ascii_alphabetic()) {
            saw_alpha = true;
        }
    }
    saw_alpha
}

/// Header handling for [`read_dataset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Decide from the first non-empty row's shape.
    #[default]
    Detect,
    /// The first non-empty row is a header.
    Present,
    /// The file has no header row.
    Absent,
}

/// Reads a CSV file into a [`Dataset`].
///
/// Rows are kept in source order with their 1-based line numbers; empty
/// lines are skipped. The expected column count is taken from the first
/// non-empty row.
pub fn read_dataset(path: &Path, header_mode: HeaderMode) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let mut rows: Vec<SourceRow> = Vec::new();
    let mut fallback_line = 0usize;
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        fallback_line += 1;
        // The reader drops blank lines before we see them; the recorded
        // position keeps diagnostics pointing at real file lines.
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(fallback_line);
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(SourceRow { line, cells });
    }

    let Some(first) = rows.first() else {
        return Ok(Dataset::default());
    };
    let expected_columns = first.cells.len();

    let has_header = match header_mode {
        HeaderMode::Present => true,
        HeaderMode::Absent => false,
        HeaderMode::Detect => is_header_like(&first.cells),
    };
    let header = if has_header {
        let header_row = rows.remove(0);
        debug!(line = header_row.line, "first non-empty row treated as header");
        Some(header_row.cells)
    } else {
        None
    };

    Ok(Dataset {
        header,
        rows,
        expected_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    #[test]
    fn header_likeness_rejects_numeric_rows() {
        assert!(is_header_like(&rows(&["institution", "period", "euro"])));
        assert!(!is_header_like(&rows(&["Harvard", "2021", "1500"])));
        assert!(!is_header_like(&rows(&["", "", ""])));
    }
}
