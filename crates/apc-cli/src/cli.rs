//! CLI argument definitions for the APC enrichment tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "apc-enrich",
    version,
    about = "Enrich APC cost data with bibliographic metadata",
    long_about = "Identify the semantic columns of an APC cost CSV file \
                  (by header names and content heuristics), merge metadata \
                  from snapshot sources into every row, and write the \
                  enriched table.\n\n\
                  Conflicting values are resolved per column, either \
                  interactively or with a fixed policy."
)]
pub struct Cli {
    /// CSV file containing APC data. The mandatory columns (institution,
    /// period, euro, doi, is_hybrid) must be identifiable.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Output file for the enriched table.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "out.csv")]
    pub output: PathBuf,

    /// Decimal mark convention of monetary values in the file.
    #[arg(long = "decimal-mark", value_enum, default_value = "point")]
    pub decimal_mark: DecimalMarkArg,

    /// Continue even if not all mandatory columns were identified; the
    /// missing ones stay NA for the whole run.
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Skip header analysis and identify columns heuristically only.
    #[arg(short = 'i', long = "ignore-header")]
    pub ignore_header: bool,

    /// Treat the first row as data even if it looks like a header.
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Classify and report without enriching or writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// How to resolve conflicts between existing and retrieved values.
    #[arg(long = "on-conflict", value_enum, default_value = "ask")]
    pub on_conflict: ConflictModeArg,

    /// Metadata snapshot file (JSON, DOI-keyed records). Repeat the flag
    /// to add sources; order defines merge priority.
    #[arg(long = "metadata", value_name = "FILE")]
    pub metadata: Vec<PathBuf>,

    /// Membership directory snapshot file (JSON, ISSN-keyed entries) for
    /// the open-access flag lookup.
    #[arg(long = "membership", value_name = "FILE")]
    pub membership: Option<PathBuf>,

    /// Canonical journal title mapping (JSON, raw title to canonical).
    #[arg(long = "journal-title-map", value_name = "FILE")]
    pub journal_title_map: Option<PathBuf>,

    /// Canonical publisher name mapping (JSON, raw name to canonical).
    #[arg(long = "publisher-name-map", value_name = "FILE")]
    pub publisher_name_map: Option<PathBuf>,

    /// Manually identify the 'institution' column (leftmost column is 0).
    #[arg(long = "institution-column", value_name = "INDEX")]
    pub institution_column: Option<usize>,

    /// Manually identify the 'period' column.
    #[arg(long = "period-column", value_name = "INDEX")]
    pub period_column: Option<usize>,

    /// Manually identify the 'euro' column.
    #[arg(long = "euro-column", value_name = "INDEX")]
    pub euro_column: Option<usize>,

    /// Manually identify the 'doi' column.
    #[arg(long = "doi-column", value_name = "INDEX")]
    pub doi_column: Option<usize>,

    /// Manually identify the 'is_hybrid' column.
    #[arg(long = "is-hybrid-column", value_name = "INDEX")]
    pub is_hybrid_column: Option<usize>,

    /// Manually identify the 'publisher' column. Optional, but articles
    /// without a DOI cannot be enriched without it.
    #[arg(long = "publisher-column", value_name = "INDEX")]
    pub publisher_column: Option<usize>,

    /// Manually identify the 'journal_full_title' column.
    #[arg(long = "journal-full-title-column", value_name = "INDEX")]
    pub journal_full_title_column: Option<usize>,

    /// Manually identify the 'issn' column.
    #[arg(long = "issn-column", value_name = "INDEX")]
    pub issn_column: Option<usize>,

    /// Manually identify the 'url' column.
    #[arg(long = "url-column", value_name = "INDEX")]
    pub url_column: Option<usize>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Forced role→index assignments from the override flags.
    pub fn forced_columns(&self) -> Vec<(&'static str, usize)> {
        let overrides = [
            ("institution", self.institution_column),
            ("period", self.period_column),
            ("euro", self.euro_column),
            ("doi", self.doi_column),
            ("is_hybrid", self.is_hybrid_column),
            ("publisher", self.publisher_column),
            ("journal_full_title", self.journal_full_title_column),
            ("issn", self.issn_column),
            ("url", self.url_column),
        ];
        overrides
            .into_iter()
            .filter_map(|(role, index)| index.map(|index| (role, index)))
            .collect()
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DecimalMarkArg {
    Point,
    Comma,
}

/// Conflict handling choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ConflictModeArg {
    /// Prompt for every new conflict.
    Ask,
    /// Keep the existing value.
    Keep,
    /// Take the retrieved value.
    Overwrite,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
