//! Classification result types.

use serde::{Deserialize, Serialize};

/// How a role was bound to its source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrigin {
    /// Pre-seeded by the caller (e.g. a command-line override).
    Forced,
    /// Matched a header alias.
    Header,
    /// Identified by content sniffing on the representative row.
    Content,
}

/// One role→index binding made during classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub role: String,
    pub index: usize,
    /// Header text at that index, when headers were available.
    pub name: Option<String>,
    pub origin: MatchOrigin,
}

/// A role the sniffing phase could not settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierDiagnostic {
    /// More than one column matched the role's content pattern.
    AmbiguousColumn { role: String, candidates: Vec<usize> },
    /// No column matched the role's content pattern.
    MissingColumn { role: String },
}

impl ClassifierDiagnostic {
    pub fn role(&self) -> &str {
        match self {
            ClassifierDiagnostic::AmbiguousColumn { role, .. }
            | ClassifierDiagnostic::MissingColumn { role } => role,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ClassifierDiagnostic::AmbiguousColumn { role, candidates } => format!(
                "could not reliably identify the '{role}' column: {} possible candidates ({})",
                candidates.len(),
                candidates
                    .iter()
                    .map(|idx| idx.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ClassifierDiagnostic::MissingColumn { role } => {
                format!("no candidate found for the '{role}' column")
            }
        }
    }
}

/// Outcome of a classification pass over one dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Bindings made by this pass, in the order they were made.
    pub assignments: Vec<Assignment>,
    /// Roles the sniffing phase left unresolved.
    pub diagnostics: Vec<ClassifierDiagnostic>,
    /// Synthetic roles appended for columns no role claimed.
    pub unknown_columns: Vec<Assignment>,
    /// Mandatory roles still unassigned after the pass; the caller decides
    /// whether that aborts the run.
    pub missing_mandatory: Vec<String>,
}

impl ClassificationReport {
    pub fn is_complete(&self) -> bool {
        self.missing_mandatory.is_empty()
    }
}
