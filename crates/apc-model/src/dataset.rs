//! Input dataset boundary types.

use serde::{Deserialize, Serialize};

/// One raw input row with its 1-based line number in the source file.
/// Line numbers survive empty-line skipping so diagnostics point at the
/// right place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    pub line: usize,
    pub cells: Vec<String>,
}

/// A parsed tabular dataset as handed to the core by the row source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Header row, when the file has one and header handling is enabled.
    pub header: Option<Vec<String>>,
    /// Data rows in source order.
    pub rows: Vec<SourceRow>,
    /// Column count the rows are expected to have.
    pub expected_columns: usize,
}

impl Dataset {
    /// The first non-empty data row, used as the representative row for
    /// content sniffing.
    pub fn sample_row(&self) -> Option<&SourceRow> {
        self.rows
            .iter()
            .find(|row| row.cells.iter().any(|cell| !cell.trim().is_empty()))
    }
}
