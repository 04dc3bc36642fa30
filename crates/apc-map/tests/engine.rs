use apc_map::{Classifier, ClassifierDiagnostic, MatchOrigin};
use apc_model::{ColumnRegistry, NumberFormat, Requirement};

fn rows(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_string()).collect()
}

#[test]
fn content_sniffing_assigns_three_distinct_roles() {
    let mut registry = ColumnRegistry::standard();
    let sample = rows(&["Some University", "10.1371/journal.pone.0085871", "2021", "1500"]);
    let classifier = Classifier::new(NumberFormat::Point).with_current_year(2026);
    let report = classifier.classify(&mut registry, None, &sample, 4);

    assert_eq!(registry.index_of("doi"), Some(1));
    assert_eq!(registry.index_of("period"), Some(2));
    assert_eq!(registry.index_of("euro"), Some(3));
    // institution and is_hybrid cannot be content-detected
    assert_eq!(report.missing_mandatory, vec!["institution", "is_hybrid"]);
}

#[test]
fn ambiguous_candidates_leave_role_unassigned() {
    let mut registry = ColumnRegistry::standard();
    // Two year-shaped cells: period cannot be settled.
    let sample = rows(&["2020", "2021", "10.1000/xyz"]);
    let classifier = Classifier::new(NumberFormat::Point).with_current_year(2026);
    let report = classifier.classify(&mut registry, None, &sample, 3);

    assert_eq!(registry.index_of("doi"), Some(2));
    assert_eq!(registry.index_of("period"), None);
    assert!(report.diagnostics.contains(&ClassifierDiagnostic::AmbiguousColumn {
        role: "period".to_string(),
        candidates: vec![0, 1],
    }));
}

#[test]
fn checks_short_circuit_in_doi_period_euro_order() {
    let mut registry = ColumnRegistry::standard();
    // 2021 is both year- and amount-shaped; the year check runs first, so
    // the euro role must find its candidate elsewhere.
    let sample = rows(&["2021", "1500"]);
    let classifier = Classifier::new(NumberFormat::Point).with_current_year(2026);
    classifier.classify(&mut registry, None, &sample, 2);

    assert_eq!(registry.index_of("period"), Some(0));
    assert_eq!(registry.index_of("euro"), Some(1));
}

#[test]
fn forced_assignments_are_never_rederived() {
    let mut registry = ColumnRegistry::standard();
    registry.assign("euro", 0, "").unwrap();
    let sample = rows(&["1500", "2500"]);
    let classifier = Classifier::new(NumberFormat::Point).with_current_year(2026);
    let report = classifier.classify(&mut registry, None, &sample, 2);

    assert_eq!(registry.index_of("euro"), Some(0));
    assert!(
        report
            .assignments
            .iter()
            .any(|a| a.role == "euro" && a.origin == MatchOrigin::Forced)
    );
}

#[test]
fn unmatched_columns_become_unique_passthrough_roles() {
    let mut registry = ColumnRegistry::standard();
    let header = rows(&["DOI", "unknown", "unknown"]);
    let sample = rows(&["10.1000/xyz", "a", "b"]);
    let classifier = Classifier::new(NumberFormat::Point).with_current_year(2026);
    let report = classifier.classify(&mut registry, Some(&header), &sample, 3);

    let unknown_roles: Vec<&str> = report
        .unknown_columns
        .iter()
        .map(|a| a.role.as_str())
        .collect();
    assert_eq!(unknown_roles, vec!["unknown", "unknown_"]);
    let appended = registry.column("unknown_").unwrap();
    assert_eq!(appended.requirement, Requirement::None);
    assert_eq!(appended.index, Some(2));
}

#[test]
fn header_disabled_falls_back_to_content_only() {
    let mut registry = ColumnRegistry::standard();
    let header = rows(&["DOI", "Period"]);
    let sample = rows(&["10.1000/xyz", "2021"]);
    let classifier = Classifier::new(NumberFormat::Point)
        .with_current_year(2026)
        .ignore_header();
    classifier.classify(&mut registry, Some(&header), &sample, 2);

    // Content still identifies both, but display names stay derived from
    // the header cells the sniffer saw.
    assert_eq!(registry.index_of("doi"), Some(0));
    assert_eq!(registry.index_of("period"), Some(1));
}
