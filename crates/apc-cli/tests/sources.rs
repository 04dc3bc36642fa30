use std::io::Write;

use tempfile::NamedTempFile;

use apc_cli::sources::{FileMembershipSource, JsonSnapshotSource, load_unification_map};
use apc_enrich::{MembershipOutcome, MembershipSource, MetadataSource, SourceResult};

fn write_json(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn snapshot_source_distinguishes_null_fields_from_missing_keys() {
    let file = write_json(
        r#"{"10.1000/xyz": {"publisher": "Springer", "license_ref": null}}"#,
    );
    let source = JsonSnapshotSource::load(file.path()).unwrap();

    match source.lookup("10.1000/xyz") {
        SourceResult::Success(record) => {
            let fields: Vec<_> = record.iter().collect();
            assert!(fields.contains(&("publisher", Some("Springer"))));
            assert!(fields.contains(&("license_ref", None)));
        }
        SourceResult::Failure(message) => panic!("lookup failed: {message}"),
    }

    match source.lookup("10.9999/absent") {
        SourceResult::Failure(message) => assert!(message.contains("not found")),
        SourceResult::Success(_) => panic!("absent DOI must report failure"),
    }
}

#[test]
fn membership_snapshot_always_answers() {
    let file = write_json(r#"{"2167-8359": {"listed": true, "title": "PeerJ"}}"#);
    let source = FileMembershipSource::load(file.path()).unwrap();

    match source.check("2167-8359") {
        MembershipOutcome::Answer { listed, title } => {
            assert!(listed);
            assert_eq!(title.as_deref(), Some("PeerJ"));
        }
        MembershipOutcome::Failed(message) => panic!("lookup failed: {message}"),
    }

    // Absent ISSNs are a definitive "not listed", not a failure.
    match source.check("0000-0000") {
        MembershipOutcome::Answer { listed, .. } => assert!(!listed),
        MembershipOutcome::Failed(message) => panic!("lookup failed: {message}"),
    }
}

#[test]
fn unification_maps_parse_as_flat_objects() {
    let file = write_json(r#"{"Springer Nature": "Springer"}"#);
    let map = load_unification_map(file.path()).unwrap();
    assert_eq!(map.get("Springer Nature").map(String::as_str), Some("Springer"));
}

#[test]
fn malformed_snapshot_reports_the_path() {
    let file = write_json("not json");
    let error = JsonSnapshotSource::load(file.path()).unwrap_err();
    assert!(format!("{error:#}").contains("parse metadata snapshot"));
}
