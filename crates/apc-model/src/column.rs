//! Column definitions: semantic roles, requirement levels and overwrite state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Requirement level of a column role.
///
/// Mandatory roles must be resolved to a source column index before
/// reconciliation can start (unless the run is forced). `None` roles are
/// derived output-only columns or unknown passthrough columns and are never
/// content-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Mandatory,
    Optional,
    None,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::Mandatory => "mandatory",
            Requirement::Optional => "optional",
            Requirement::None => "non-required",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-column rule governing whether a new value may replace an existing
/// non-NA value. `Ask` defers to the decision provider; the other two are
/// standing answers set either up front or by a remembered decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    Always,
    Ask,
    Never,
}

/// One semantic column of the dataset.
///
/// A column starts out with no source index; classification (or a forced
/// assignment) binds it to a position in the input rows. The overwrite
/// whitelist and blacklist memoize exact old→new value pairs that were
/// approved or rejected earlier in the run, so identical conflicts are not
/// re-asked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Semantic role identifier, unique within a registry.
    pub role: String,
    pub requirement: Requirement,
    /// Position in the source row; `None` until identified.
    pub index: Option<usize>,
    /// Best-known human label (header text when available).
    pub display_name: String,
    pub policy: OverwritePolicy,
    /// Old values whose replacement was approved as a standing rule.
    #[serde(default)]
    pub whitelist: BTreeMap<String, String>,
    /// Exact old→new pairs whose replacement was rejected.
    #[serde(default)]
    pub blacklist: BTreeMap<String, String>,
}

impl Column {
    pub fn new(role: impl Into<String>, requirement: Requirement) -> Self {
        let role = role.into();
        Self {
            display_name: role.clone(),
            role,
            requirement,
            index: None,
            policy: OverwritePolicy::Ask,
            whitelist: BTreeMap::new(),
            blacklist: BTreeMap::new(),
        }
    }

    /// Label used when presenting this column to a human: the header text
    /// when one was seen, otherwise the role itself.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.role
        } else {
            &self.display_name
        }
    }

}
