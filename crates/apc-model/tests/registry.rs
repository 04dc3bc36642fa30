use apc_model::{CellValue, ColumnRegistry, Requirement, Row};

#[test]
fn registry_serde_round_trip_restores_lookup() {
    let mut registry = ColumnRegistry::standard();
    registry.assign("doi", 3, "DOI").unwrap();
    let json = serde_json::to_string(&registry).expect("serialize registry");
    let mut restored: ColumnRegistry = serde_json::from_str(&json).expect("deserialize registry");
    restored.rebuild_positions();
    assert_eq!(restored.index_of("doi"), Some(3));
    assert_eq!(restored.role_at(3), Some("doi"));
    assert_eq!(restored.roles(), registry.roles());
}

#[test]
fn rows_default_missing_roles_to_na() {
    let registry = ColumnRegistry::standard();
    let mut row = Row::new();
    row.set("doi", CellValue::Text("10.1/abc".to_string()));
    for column in registry.iter() {
        let value = row.get(&column.role);
        if column.role == "doi" {
            assert_eq!(value.as_output_str(), "10.1/abc");
        } else {
            assert!(value.is_na());
        }
    }
}

#[test]
fn na_literal_is_canonicalized() {
    assert!(CellValue::from_raw("NA").is_na());
    assert!(!CellValue::from_raw("na").is_na());
    assert!(!CellValue::from_raw("").is_na());
    assert!(CellValue::from_raw("").is_blank());
    assert!(CellValue::from_raw("  ").is_blank());
}

#[test]
fn forced_registration_claims_index() {
    let mut registry = ColumnRegistry::new();
    registry
        .register("euro", Requirement::Mandatory, Some(2))
        .unwrap();
    let err = registry
        .register("period", Requirement::Mandatory, Some(2))
        .unwrap_err();
    assert!(err.to_string().contains("claimed by role 'euro'"));
}
