//! Ordered column registry with bidirectional role/index lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::{Column, Requirement};
use crate::error::{RegistryError, Result};

/// Ordered collection of [`Column`]s keyed by role.
///
/// Insertion order defines the output column order. The registry enforces
/// two invariants on every mutation: role strings are unique, and at most
/// one column holds any given source index. It is built once per dataset,
/// mutated during classification (index/name assignment, unknown-column
/// discovery) and frozen afterwards except for per-column overwrite state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    #[serde(skip)]
    positions: BTreeMap<String, usize>,
    #[serde(skip)]
    index_owners: BTreeMap<usize, String>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard APC schema in output column order.
    ///
    /// Mandatory roles form the closed set the pipeline refuses to run
    /// without; the non-required tail columns are filled from metadata
    /// sources or derived during reconciliation.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let roles: &[(&str, Requirement)] = &[
            ("institution", Requirement::Mandatory),
            ("period", Requirement::Mandatory),
            ("euro", Requirement::Mandatory),
            ("doi", Requirement::Mandatory),
            ("is_hybrid", Requirement::Mandatory),
            ("publisher", Requirement::Optional),
            ("journal_full_title", Requirement::Optional),
            ("issn", Requirement::Optional),
            ("issn_print", Requirement::None),
            ("issn_electronic", Requirement::None),
            ("license_ref", Requirement::None),
            ("indexed_in_crossref", Requirement::None),
            ("pmid", Requirement::None),
            ("pmcid", Requirement::None),
            ("ut", Requirement::None),
            ("url", Requirement::Optional),
            ("doaj", Requirement::None),
        ];
        for (role, requirement) in roles {
            registry
                .register(*role, *requirement, None)
                .expect("standard roles are distinct");
        }
        registry
    }

    /// Inserts a new column, optionally pre-bound to a source index.
    ///
    /// # Errors
    ///
    /// `DuplicateRole` if the role already exists; `IndexInUse` if the
    /// forced index is already claimed by another column.
    pub fn register(
        &mut self,
        role: impl Into<String>,
        requirement: Requirement,
        forced_index: Option<usize>,
    ) -> Result<()> {
        let role = role.into();
        if self.positions.contains_key(&role) {
            return Err(RegistryError::DuplicateRole(role));
        }
        if let Some(index) = forced_index
            && let Some(owner) = self.role_at(index)
        {
            return Err(RegistryError::IndexInUse {
                index,
                role: owner.to_string(),
            });
        }
        let mut column = Column::new(role.clone(), requirement);
        column.index = forced_index;
        if let Some(index) = forced_index {
            self.index_owners.insert(index, role.clone());
        }
        self.positions.insert(role, self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Binds a role to a source index and records the header text seen there.
    ///
    /// Assigning the same index twice is idempotent; assigning a different
    /// index to an already-bound role is an error, as is claiming an index
    /// another role holds.
    pub fn assign(&mut self, role: &str, index: usize, name: &str) -> Result<()> {
        match self.column(role).map(|column| column.index) {
            None => return Err(RegistryError::UnknownRole(role.to_string())),
            Some(Some(existing)) if existing == index => return Ok(()),
            Some(Some(existing)) => {
                return Err(RegistryError::AlreadyAssigned {
                    role: role.to_string(),
                    existing,
                    index,
                });
            }
            Some(None) => {}
        }
        if let Some(owner) = self.role_at(index)
            && owner != role
        {
            return Err(RegistryError::IndexInUse {
                index,
                role: owner.to_string(),
            });
        }
        self.index_owners.insert(index, role.to_string());
        let column = self
            .column_mut(role)
            .expect("existence checked above");
        column.index = Some(index);
        if !name.is_empty() {
            column.display_name = name.to_string();
        }
        Ok(())
    }

    pub fn column(&self, role: &str) -> Option<&Column> {
        self.positions.get(role).map(|pos| &self.columns[*pos])
    }

    pub fn column_mut(&mut self, role: &str) -> Option<&mut Column> {
        self.positions
            .get(role)
            .map(|pos| &mut self.columns[*pos])
    }

    pub fn index_of(&self, role: &str) -> Option<usize> {
        self.column(role).and_then(|column| column.index)
    }

    /// The role bound to a source index, if any.
    pub fn role_at(&self, index: usize) -> Option<&str> {
        self.index_owners.get(&index).map(String::as_str)
    }

    /// Mandatory columns still lacking an index; drives the abort-or-force
    /// decision after classification.
    pub fn unassigned_mandatory(&self) -> Vec<&Column> {
        self.unassigned_with(Requirement::Mandatory)
    }

    /// Optional columns still lacking an index; every row then needs a
    /// resolvable identifier, which is worth a warning.
    pub fn unassigned_optional(&self) -> Vec<&Column> {
        self.unassigned_with(Requirement::Optional)
    }

    fn unassigned_with(&self, requirement: Requirement) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|column| column.requirement == requirement && column.index.is_none())
            .collect()
    }

    /// Appends a synthetic non-required column for a source index that
    /// matched no known role. The generated role is the header name (or
    /// `unknown` when the header is blank), suffixed with `_` until unique.
    /// Returns the generated role.
    pub fn append_unknown(&mut self, index: usize, name: &str) -> Result<String> {
        if let Some(owner) = self.role_at(index) {
            return Err(RegistryError::IndexInUse {
                index,
                role: owner.to_string(),
            });
        }
        let base = name.trim();
        let mut role = if base.is_empty() {
            "unknown".to_string()
        } else {
            base.to_string()
        };
        while self.positions.contains_key(&role) {
            role.push('_');
        }
        self.register(role.clone(), Requirement::None, Some(index))?;
        let column = self.column_mut(&role).expect("just registered");
        column.display_name = name.to_string();
        Ok(role)
    }

    /// Columns in output order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Role names in output order.
    pub fn roles(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.role.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Rebuilds the derived lookup tables. Needed after deserialization,
    /// which restores columns but skips both maps.
    pub fn rebuild_positions(&mut self) {
        self.positions = self
            .columns
            .iter()
            .enumerate()
            .map(|(pos, column)| (column.role.clone(), pos))
            .collect();
        self.index_owners = self
            .columns
            .iter()
            .filter_map(|column| {
                column
                    .index
                    .map(|index| (index, column.role.clone()))
            })
            .collect();
    }
}
