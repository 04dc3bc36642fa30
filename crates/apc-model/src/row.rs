//! Row and metadata record values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel text used for absent values in the output format.
pub const NA: &str = "NA";

/// A single cell value: observed text or the NA sentinel.
///
/// NA is distinct from the empty string: it means the field is conceptually
/// present but has no observed value yet. The literal cell text `NA` is
/// canonicalized into the sentinel on construction so that file input,
/// source records and derived values compare consistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Na,
}

impl CellValue {
    /// Builds a cell from raw text, mapping the `NA` literal to the sentinel.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw == NA { CellValue::Na } else { CellValue::Text(raw) }
    }

    pub fn is_na(&self) -> bool {
        matches!(self, CellValue::Na)
    }

    /// True for NA and for empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Na => true,
            CellValue::Text(text) => text.trim().is_empty(),
        }
    }

    /// The value as it appears in output rows (`NA` for the sentinel).
    pub fn as_output_str(&self) -> &str {
        match self {
            CellValue::Text(text) => text,
            CellValue::Na => NA,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_output_str())
    }
}

/// One output row: role→value cells, ordered by the owning registry.
///
/// All registry roles are present in every row, defaulting to NA. Cell
/// ordering for output is owned by the registry, not the row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: &str) -> &CellValue {
        self.cells.get(role).unwrap_or(&CellValue::Na)
    }

    pub fn set(&mut self, role: impl Into<String>, value: CellValue) {
        self.cells.insert(role.into(), value);
    }

    pub fn contains(&self, role: &str) -> bool {
        self.cells.contains_key(role)
    }
}

/// A metadata record handed over by an external source.
///
/// Fields map to either a value or an explicit "no value" reported by the
/// source. A field absent from the record never reaches the merge; a field
/// present with `None` collapses to NA (and is worth a diagnostic, since
/// the source knew about the field but could not fill it).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Option<String>) {
        self.fields.insert(field.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
