//! The enrichment command: ingest, classify, gate, reconcile, write.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use apc_cli::prompt::PolicyDecisions;
use apc_cli::sources::{FileMembershipSource, JsonSnapshotSource, load_unification_map};
use apc_enrich::{EnrichedRow, MapUnifier, ReconciliationEngine};
use apc_ingest::{HeaderMode, read_dataset, write_output};
use apc_map::Classifier;
use apc_model::{ColumnRegistry, NumberFormat};

use crate::cli::{Cli, ConflictModeArg, DecimalMarkArg};
use crate::summary::print_classification;
use crate::types::EnrichResult;

pub fn run_enrich(args: &Cli) -> Result<EnrichResult> {
    let number_format = match args.decimal_mark {
        DecimalMarkArg::Point => NumberFormat::Point,
        DecimalMarkArg::Comma => NumberFormat::Comma,
    };

    // Stage 1: ingest
    let ingest_span = info_span!("ingest", file = %args.csv_file.display());
    let dataset = ingest_span.in_scope(|| {
        let header_mode = if args.no_header {
            HeaderMode::Absent
        } else {
            HeaderMode::Detect
        };
        read_dataset(&args.csv_file, header_mode)
    })?;
    if dataset.rows.is_empty() {
        bail!("no data rows in {}", args.csv_file.display());
    }
    info!(
        columns = dataset.expected_columns,
        rows = dataset.rows.len(),
        decimal_mark = %number_format,
        "CSV file loaded"
    );

    // Stage 2: classify
    let mut registry = ColumnRegistry::standard();
    for (role, index) in args.forced_columns() {
        registry
            .assign(role, index, "")
            .with_context(|| format!("apply --{}-column override", role.replace('_', "-")))?;
    }
    let mut classifier = Classifier::new(number_format);
    if args.ignore_header {
        classifier = classifier.ignore_header();
    }
    let sample = dataset
        .sample_row()
        .context("no non-empty data row to analyze")?
        .clone();
    let classify_span = info_span!("classify");
    let report = classify_span.in_scope(|| {
        classifier.classify(
            &mut registry,
            dataset.header.as_deref(),
            &sample.cells,
            dataset.expected_columns,
        )
    });
    print_classification(&registry, dataset.header.as_deref(), &report, dataset.expected_columns);

    // Stage 3: gate on mandatory columns
    if !report.is_complete() {
        if args.force {
            warn!(
                roles = %report.missing_mandatory.join(", "),
                "mandatory columns unidentified, forced to continue; those fields stay NA"
            );
        } else {
            bail!(
                "cannot continue: the mandatory column(s) {} could not be identified. \
                 Either name them in the CSV header, identify them with the \
                 --<role>-column flags (see --help), or pass --force to continue \
                 with those fields as NA",
                report.missing_mandatory.join(", ")
            );
        }
    }
    if !registry.unassigned_optional().is_empty() {
        warn!(
            "not all optional columns could be identified; metadata aggregation is \
             still possible, but every row will need a valid DOI"
        );
    }

    if args.dry_run {
        return Ok(EnrichResult {
            output: None,
            total_rows: dataset.rows.len(),
            reconciled: 0,
            passthrough: 0,
            diagnostics: Vec::new(),
        });
    }

    // Stage 4: reconcile
    let provider = match args.on_conflict {
        ConflictModeArg::Ask => PolicyDecisions::interactive(),
        ConflictModeArg::Keep => PolicyDecisions::keep(),
        ConflictModeArg::Overwrite => PolicyDecisions::overwrite(),
    };
    let mut engine = ReconciliationEngine::new(registry, provider, number_format);
    for path in &args.metadata {
        engine = engine.with_source(Box::new(JsonSnapshotSource::load(path)?));
    }
    if let Some(path) = &args.membership {
        engine = engine.with_membership(Box::new(FileMembershipSource::load(path)?));
    }
    let mut unifier = MapUnifier::new();
    if let Some(path) = &args.journal_title_map {
        unifier.set_role_map("journal_full_title", load_unification_map(path)?);
    }
    if let Some(path) = &args.publisher_name_map {
        unifier.set_role_map("publisher", load_unification_map(path)?);
    }
    engine = engine.with_unifier(Box::new(unifier));

    let enrich_span = info_span!("enrich", rows = dataset.rows.len());
    let output =
        enrich_span.in_scope(|| engine.process(&dataset.rows, dataset.expected_columns))?;

    // Stage 5: write
    write_output(&args.output, &output)
        .with_context(|| format!("write enriched output: {}", args.output.display()))?;
    info!(path = %args.output.display(), "enriched output written");

    let passthrough = output
        .rows
        .iter()
        .filter(|row| matches!(row, EnrichedRow::Passthrough(_)))
        .count();
    Ok(EnrichResult {
        output: Some(args.output.clone()),
        total_rows: output.rows.len(),
        reconciled: output.rows.len() - passthrough,
        passthrough,
        diagnostics: output.diagnostics,
    })
}
