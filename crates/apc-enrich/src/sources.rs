//! Boundary traits for external metadata and membership sources.
//!
//! Network clients, retries and timeouts live behind these traits; the
//! engine only sees synchronous lookups that either hand over a record or
//! report failure.

use apc_model::MetadataRecord;

/// Result of a metadata lookup for one identifying key.
#[derive(Debug, Clone)]
pub enum SourceResult {
    Success(MetadataRecord),
    Failure(String),
}

/// An external bibliographic metadata source, queried once per row by the
/// row's identifying field (typically the DOI).
pub trait MetadataSource {
    /// Short name used in logs and diagnostics (e.g. "crossref").
    fn name(&self) -> &str;

    fn lookup(&self, key: &str) -> SourceResult;
}

/// Outcome of a membership lookup for one identifier candidate.
///
/// An `Answer` is definitive whether or not the journal is listed; only
/// `Failed` moves the fallback chain to the next candidate.
#[derive(Debug, Clone)]
pub enum MembershipOutcome {
    Answer { listed: bool, title: Option<String> },
    Failed(String),
}

/// A directory that answers "is this journal listed?" for an identifier
/// (e.g. a DOAJ lookup by ISSN).
pub trait MembershipSource {
    fn name(&self) -> &str;

    fn check(&self, issn: &str) -> MembershipOutcome;
}
