//! Two-phase column classifier.
//!
//! Phase 1 matches header cells against the role alias table; phase 2
//! sniffs the first data row for DOI-, year- and amount-shaped content.
//! Both phases run once per dataset, never per row.

use chrono::Datelike;
use tracing::{debug, info, warn};

use apc_model::{ColumnRegistry, NumberFormat};

use crate::aliases::role_for_header;
use crate::patterns::{looks_like_amount, looks_like_doi, looks_like_period};
use crate::types::{Assignment, ClassificationReport, ClassifierDiagnostic, MatchOrigin};

/// Roles the sniffing phase can identify, in test order. Checks
/// short-circuit, so a cell is credited to at most one candidate list.
const SNIFFED_ROLES: [&str; 3] = ["doi", "period", "euro"];

/// Column classifier for one dataset.
///
/// The registry handed to [`Classifier::classify`] may already carry
/// forced assignments; those are reported but never re-derived. After the
/// pass, columns no role claimed are appended to the registry as synthetic
/// non-required roles.
#[derive(Debug, Clone)]
pub struct Classifier {
    number_format: NumberFormat,
    current_year: i32,
    use_header: bool,
}

impl Classifier {
    pub fn new(number_format: NumberFormat) -> Self {
        Self {
            number_format,
            current_year: chrono::Utc::now().year(),
            use_header: true,
        }
    }

    /// Skip header analysis even when a header row is present.
    #[must_use]
    pub fn ignore_header(mut self) -> Self {
        self.use_header = false;
        self
    }

    /// Pin the reference year for period sniffing (tests).
    #[must_use]
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Runs both phases against the registry.
    ///
    /// `header` is the header row when the dataset has one; `sample_row`
    /// is the first non-empty data row; `expected_columns` is the dataset
    /// column count used for unknown-column discovery.
    pub fn classify(
        &self,
        registry: &mut ColumnRegistry,
        header: Option<&[String]>,
        sample_row: &[String],
        expected_columns: usize,
    ) -> ClassificationReport {
        let mut report = ClassificationReport::default();

        for column in registry.iter() {
            if let Some(index) = column.index {
                report.assignments.push(Assignment {
                    role: column.role.clone(),
                    index,
                    name: header.and_then(|row| row.get(index).cloned()),
                    origin: MatchOrigin::Forced,
                });
            }
        }

        if self.use_header
            && let Some(header) = header
        {
            self.match_header(registry, header, &mut report);
        }
        self.sniff_content(registry, header, sample_row, &mut report);

        report.missing_mandatory = registry
            .unassigned_mandatory()
            .iter()
            .map(|column| column.role.clone())
            .collect();
        for role in &report.missing_mandatory {
            warn!(role = %role, "mandatory column is still unidentified");
        }

        self.append_unknown_columns(registry, header, expected_columns, &mut report);
        report
    }

    /// Phase 1: first header cell naming a role wins; later duplicates for
    /// an already-assigned role are ignored.
    fn match_header(
        &self,
        registry: &mut ColumnRegistry,
        header: &[String],
        report: &mut ClassificationReport,
    ) {
        for (index, cell) in header.iter().enumerate() {
            let Some(role) = role_for_header(cell) else {
                continue;
            };
            if registry.index_of(role).is_some() {
                debug!(role, index, "header repeats an already-assigned role, ignored");
                continue;
            }
            if registry.role_at(index).is_some() {
                continue;
            }
            if registry.assign(role, index, cell.trim()).is_ok() {
                info!(role, index, name = %cell.trim(), "header names a known column");
                report.assignments.push(Assignment {
                    role: role.to_string(),
                    index,
                    name: Some(cell.trim().to_string()),
                    origin: MatchOrigin::Header,
                });
            }
        }
    }

    /// Phase 2: one pass over the representative row. Each unclaimed cell
    /// is tested against the patterns of the still-unassigned sniffable
    /// roles in fixed order; a role with exactly one candidate gets it.
    fn sniff_content(
        &self,
        registry: &mut ColumnRegistry,
        header: Option<&[String]>,
        sample_row: &[String],
        report: &mut ClassificationReport,
    ) {
        let mut candidates: Vec<(&str, Vec<usize>)> = SNIFFED_ROLES
            .iter()
            .filter(|role| registry.index_of(role).is_none())
            .map(|role| (*role, Vec::new()))
            .collect();
        if candidates.is_empty() {
            return;
        }

        for (index, cell) in sample_row.iter().enumerate() {
            if registry.role_at(index).is_some() {
                continue;
            }
            let cell = cell.trim();
            for (role, found) in &mut candidates {
                let matched = match *role {
                    "doi" => looks_like_doi(cell),
                    "period" => looks_like_period(cell, self.current_year),
                    "euro" => looks_like_amount(cell, self.number_format),
                    _ => false,
                };
                if matched {
                    debug!(role, index, value = cell, "content matches role pattern");
                    found.push(index);
                    break;
                }
            }
        }

        for (role, found) in candidates {
            match found.as_slice() {
                [index] => {
                    let name = header
                        .and_then(|row| row.get(*index))
                        .map(|cell| cell.trim().to_string())
                        .unwrap_or_default();
                    if registry.assign(role, *index, &name).is_ok() {
                        info!(role, index, "content sniffing assigned column");
                        report.assignments.push(Assignment {
                            role: role.to_string(),
                            index: *index,
                            name: (!name.is_empty()).then_some(name),
                            origin: MatchOrigin::Content,
                        });
                    }
                }
                [] => {
                    report.diagnostics.push(ClassifierDiagnostic::MissingColumn {
                        role: role.to_string(),
                    });
                }
                many => {
                    report.diagnostics.push(ClassifierDiagnostic::AmbiguousColumn {
                        role: role.to_string(),
                        candidates: many.to_vec(),
                    });
                }
            }
        }
    }

    fn append_unknown_columns(
        &self,
        registry: &mut ColumnRegistry,
        header: Option<&[String]>,
        expected_columns: usize,
        report: &mut ClassificationReport,
    ) {
        for index in 0..expected_columns {
            if registry.role_at(index).is_some() {
                continue;
            }
            let name = header
                .and_then(|row| row.get(index))
                .map(|cell| cell.trim().to_string())
                .unwrap_or_default();
            match registry.append_unknown(index, &name) {
                Ok(role) => {
                    info!(role = %role, index, "unmatched column will be passed through");
                    report.unknown_columns.push(Assignment {
                        role,
                        index,
                        name: (!name.is_empty()).then_some(name),
                        origin: MatchOrigin::Content,
                    });
                }
                Err(error) => warn!(index, %error, "could not append unknown column"),
            }
        }
    }
}
