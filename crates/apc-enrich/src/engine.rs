//! Per-row reconciliation of native values with external metadata.
//!
//! For each row the engine builds an initial [`Row`] from the registry,
//! merges records from every metadata source in priority order through
//! the overwrite resolver, and finishes with the membership fallback
//! chain. Rows are processed strictly in source order: the resolver's
//! memoized state is shared across the whole run and must observe
//! conflicts in a stable order.

use tracing::{debug, info, warn};

use apc_model::{CellValue, ColumnRegistry, NumberFormat, Row, SourceRow, format_amount};

use crate::error::{EnrichError, Result};
use crate::resolver::{DecisionProvider, OverwriteResolver};
use crate::sources::{MembershipOutcome, MembershipSource, MetadataSource, SourceResult};
use crate::unify::{IdentityUnifier, ValueUnifier};

/// Role holding the row's identifying key for metadata lookups.
const KEY_ROLE: &str = "doi";
/// Monetary role canonicalized while building the initial row.
const AMOUNT_ROLE: &str = "euro";
/// Derived flag recording whether the primary source resolved the key.
const PRESENCE_FLAG_ROLE: &str = "indexed_in_crossref";
/// Roles whose incoming values pass through the unifier.
const UNIFIED_ROLES: [&str; 2] = ["journal_full_title", "publisher"];
/// Role resolved by the membership fallback chain.
const MEMBERSHIP_ROLE: &str = "doaj";
/// Identifier candidates for the membership chain, in lookup order.
const MEMBERSHIP_CANDIDATES: [&str; 3] = ["issn_electronic", "issn", "issn_print"];

/// A line-indexed diagnostic recorded during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// One output row: reconciled, or passed through untouched because its
/// shape disagreed with the expected column count.
#[derive(Debug, Clone)]
pub enum EnrichedRow {
    Reconciled(Row),
    Passthrough(Vec<String>),
}

/// Result of a full reconciliation run.
#[derive(Debug)]
pub struct EnrichedOutput {
    /// Output column roles in registry order.
    pub columns: Vec<String>,
    pub rows: Vec<EnrichedRow>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Orchestrates the merge for every row of a dataset.
pub struct ReconciliationEngine<P> {
    registry: ColumnRegistry,
    resolver: OverwriteResolver<P>,
    sources: Vec<Box<dyn MetadataSource>>,
    membership: Option<Box<dyn MembershipSource>>,
    unifier: Box<dyn ValueUnifier>,
    number_format: NumberFormat,
}

impl<P: DecisionProvider> ReconciliationEngine<P> {
    pub fn new(registry: ColumnRegistry, provider: P, number_format: NumberFormat) -> Self {
        Self {
            registry,
            resolver: OverwriteResolver::new(provider),
            sources: Vec::new(),
            membership: None,
            unifier: Box::new(IdentityUnifier),
            number_format,
        }
    }

    /// Appends a metadata source; call order defines merge priority.
    #[must_use]
    pub fn with_source(mut self, source: Box<dyn MetadataSource>) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn with_membership(mut self, source: Box<dyn MembershipSource>) -> Self {
        self.membership = Some(source);
        self
    }

    #[must_use]
    pub fn with_unifier(mut self, unifier: Box<dyn ValueUnifier>) -> Self {
        self.unifier = unifier;
        self
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Processes all rows, strictly in source order.
    ///
    /// # Errors
    ///
    /// Fatal only for an unparseable monetary cell; per-row and per-source
    /// failures become diagnostics and processing continues.
    pub fn process(&mut self, rows: &[SourceRow], expected_columns: usize) -> Result<EnrichedOutput> {
        let mut output = EnrichedOutput {
            columns: self
                .registry
                .roles()
                .into_iter()
                .map(str::to_string)
                .collect(),
            rows: Vec::with_capacity(rows.len()),
            diagnostics: Vec::new(),
        };
        for source_row in rows {
            if source_row.cells.len() != expected_columns {
                let message = format!(
                    "the number of values in line {} ({}) differs from the number of columns ({}); \
                     line left unchanged, please correct the input and re-run",
                    source_row.line,
                    source_row.cells.len(),
                    expected_columns
                );
                warn!(line = source_row.line, "{message}");
                output.diagnostics.push(Diagnostic::new(source_row.line, message));
                output
                    .rows
                    .push(EnrichedRow::Passthrough(source_row.cells.clone()));
                continue;
            }
            debug!(line = source_row.line, "processing row");
            let row = self.reconcile_row(source_row, &mut output.diagnostics)?;
            output.rows.push(EnrichedRow::Reconciled(row));
        }
        Ok(output)
    }

    fn reconcile_row(
        &mut self,
        source_row: &SourceRow,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Row> {
        let mut row = self.initial_row(&source_row.cells)?;
        let key = row.get(KEY_ROLE).as_output_str().to_string();

        for position in 0..self.sources.len() {
            let name = self.sources[position].name().to_string();
            match self.sources[position].lookup(&key) {
                SourceResult::Success(record) => {
                    info!(source = %name, key = %key, "source resolved row key");
                    if position == 0 && self.registry.column(PRESENCE_FLAG_ROLE).is_some() {
                        row.set(PRESENCE_FLAG_ROLE, CellValue::Text("TRUE".to_string()));
                    }
                    for (field, value) in record.iter() {
                        self.merge_field(&mut row, field, value, &key);
                    }
                }
                SourceResult::Failure(message) => {
                    let message =
                        format!("{name}: error while trying to resolve '{key}': {message}");
                    warn!(line = source_row.line, "{message}");
                    diagnostics.push(Diagnostic::new(source_row.line, message));
                    if position == 0 && self.registry.column(PRESENCE_FLAG_ROLE).is_some() {
                        row.set(PRESENCE_FLAG_ROLE, CellValue::Text("FALSE".to_string()));
                    }
                }
            }
        }

        self.resolve_membership(&mut row, source_row.line, diagnostics);
        Ok(row)
    }

    /// Copies native column values into a fresh row, NA for unassigned or
    /// empty cells, with the monetary column canonicalized so the output
    /// always carries a dot decimal mark.
    fn initial_row(&self, cells: &[String]) -> Result<Row> {
        let mut row = Row::new();
        for column in self.registry.iter() {
            let raw = column
                .index
                .and_then(|index| cells.get(index))
                .map(|cell| cell.trim())
                .unwrap_or_default();
            if raw.is_empty() {
                row.set(column.role.clone(), CellValue::Na);
                continue;
            }
            let value = if column.role == AMOUNT_ROLE {
                let amount = self.number_format.parse(raw).ok_or_else(|| {
                    EnrichError::ValueParse {
                        value: raw.to_string(),
                        column: column.label().to_string(),
                    }
                })?;
                CellValue::Text(format_amount(amount))
            } else {
                CellValue::from_raw(raw)
            };
            row.set(column.role.clone(), value);
        }
        Ok(row)
    }

    fn merge_field(&mut self, row: &mut Row, field: &str, value: Option<&str>, key: &str) {
        if self.registry.column(field).is_none() {
            debug!(field, "source reported a field outside the registry, ignored");
            return;
        }
        let new_value = match value {
            Some(raw) => {
                if UNIFIED_ROLES.contains(&field) {
                    let unified = self.unifier.unify(field, raw);
                    if unified != raw {
                        info!(
                            field,
                            from = raw,
                            to = %unified,
                            "normalized value to maintain consistency"
                        );
                    }
                    CellValue::from_raw(unified)
                } else {
                    CellValue::from_raw(raw)
                }
            }
            None => {
                debug!(field, key, "field not present in source response");
                CellValue::Na
            }
        };
        let old_value = row.get(field).clone();
        let column = self
            .registry
            .column_mut(field)
            .expect("presence checked above");
        let resolved = self.resolver.resolve(column, &old_value, &new_value);
        row.set(field.to_string(), resolved);
    }

    /// Resolves the membership flag through the identifier fallback chain.
    ///
    /// The first received answer wins, listed or not; only an outright
    /// lookup failure advances to the next candidate.
    fn resolve_membership(&self, row: &mut Row, line: usize, diagnostics: &mut Vec<Diagnostic>) {
        let Some(membership) = self.membership.as_ref() else {
            return;
        };
        if self.registry.column(MEMBERSHIP_ROLE).is_none()
            || row.get(MEMBERSHIP_ROLE).as_output_str() == "TRUE"
        {
            return;
        }
        for candidate in MEMBERSHIP_CANDIDATES {
            let issn = row.get(candidate).clone();
            if issn.is_blank() {
                continue;
            }
            let issn = issn.as_output_str();
            match membership.check(issn) {
                MembershipOutcome::Answer { listed, title } => {
                    if listed {
                        info!(
                            source = membership.name(),
                            issn,
                            title = title.as_deref().unwrap_or(""),
                            "journal found in membership directory"
                        );
                        row.set(MEMBERSHIP_ROLE, CellValue::Text("TRUE".to_string()));
                    } else {
                        debug!(source = membership.name(), issn, "journal not listed");
                        row.set(MEMBERSHIP_ROLE, CellValue::Text("FALSE".to_string()));
                    }
                    return;
                }
                MembershipOutcome::Failed(message) => {
                    let message = format!(
                        "{}: error while trying to look up '{issn}': {message}",
                        membership.name()
                    );
                    warn!(line, "{message}");
                    diagnostics.push(Diagnostic::new(line, message));
                }
            }
        }
    }
}
