//! File-backed metadata and membership sources.
//!
//! These read JSON snapshots prepared offline, keeping the enrichment run
//! itself fully deterministic. Live API clients are separate tools that
//! produce the same snapshot shape.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use apc_enrich::{
    MembershipOutcome, MembershipSource, MetadataSource, SourceResult,
};
use apc_model::MetadataRecord;

/// Metadata source backed by a JSON snapshot of DOI-keyed records.
///
/// Snapshot shape: `{"10.1000/xyz": {"publisher": "...", "license_ref": null}}`.
/// A `null` field is an explicit "no value" from the source; a DOI absent
/// from the snapshot reports lookup failure.
#[derive(Debug)]
pub struct JsonSnapshotSource {
    name: String,
    records: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

impl JsonSnapshotSource {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read metadata snapshot: {}", path.display()))?;
        let records: BTreeMap<String, BTreeMap<String, Option<String>>> =
            serde_json::from_str(&content)
                .with_context(|| format!("parse metadata snapshot: {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        Ok(Self { name, records })
    }
}

impl MetadataSource for JsonSnapshotSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> SourceResult {
        match self.records.get(key) {
            Some(fields) => SourceResult::Success(
                fields
                    .iter()
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect::<MetadataRecord>(),
            ),
            None => SourceResult::Failure("DOI not found in snapshot".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MembershipEntry {
    listed: bool,
    #[serde(default)]
    title: Option<String>,
}

/// Membership directory backed by a JSON snapshot of ISSN-keyed entries.
///
/// Snapshot shape: `{"2167-8359": {"listed": true, "title": "PeerJ"}}`.
/// An ISSN absent from the snapshot is a definitive "not listed" answer,
/// mirroring a directory query that came back empty.
pub struct FileMembershipSource {
    name: String,
    entries: BTreeMap<String, MembershipEntry>,
}

impl FileMembershipSource {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read membership snapshot: {}", path.display()))?;
        let entries: BTreeMap<String, MembershipEntry> = serde_json::from_str(&content)
            .with_context(|| format!("parse membership snapshot: {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "membership".to_string());
        Ok(Self { name, entries })
    }
}

impl MembershipSource for FileMembershipSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, issn: &str) -> MembershipOutcome {
        match self.entries.get(issn) {
            Some(entry) => MembershipOutcome::Answer {
                listed: entry.listed,
                title: entry.title.clone(),
            },
            None => MembershipOutcome::Answer {
                listed: false,
                title: None,
            },
        }
    }
}

/// Loads a raw→canonical JSON mapping for the unifier.
pub fn load_unification_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read unification map: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parse unification map: {}", path.display()))
}
