use std::path::PathBuf;

use apc_enrich::Diagnostic;

/// Outcome of one enrichment run, for the end-of-run summary.
#[derive(Debug)]
pub struct EnrichResult {
    /// Written output file; `None` for dry runs.
    pub output: Option<PathBuf>,
    pub total_rows: usize,
    pub reconciled: usize,
    pub passthrough: usize,
    pub diagnostics: Vec<Diagnostic>,
}
