mod common;

use common::{bp_fact_type, dimension, fact_type, new_fact, pairs, store_with};
use facet_core::{DimensionEntry, DimensionType, EngineError, FactPatch};

#[test]
fn test_missing_required_dimension_rejected() {
    let mut store = store_with(&[bp_fact_type()]);
    let error = store
        .insert_fact(new_fact("bp", &[("systolic", "130")]))
        .unwrap_err();

    assert_eq!(error.status(), 400);
    assert_eq!(error.code(), "E_VALIDATION_ERROR");
    assert_eq!(error.title(), "Dimension validation failed");
    assert!(error.to_string().contains("diastolic"));

    // The transaction rolled back: nothing was stored.
    let records = store.query(&pairs(&[("filter[type_key]", "bp")])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_all_required_dimensions_present_succeeds() {
    let mut store = store_with(&[bp_fact_type()]);
    let fact = store
        .insert_fact(new_fact("bp", &[("systolic", "130"), ("diastolic", "85")]))
        .unwrap();
    assert_eq!(fact.dimensions.len(), 2);
}

#[test]
fn test_undeclared_dimensions_tolerated_on_write() {
    let mut store = store_with(&[bp_fact_type()]);
    let fact = store
        .insert_fact(new_fact(
            "bp",
            &[("systolic", "130"), ("diastolic", "85"), ("device", "cuff-3")],
        ))
        .unwrap();
    assert!(fact.dimensions.contains(&DimensionEntry::new("device", "cuff-3")));
}

#[test]
fn test_values_not_type_checked_on_write() {
    let mut store = store_with(&[bp_fact_type()]);
    // "n/a" is not a number, but writes are schema-on-read.
    assert!(store
        .insert_fact(new_fact("bp", &[("systolic", "n/a"), ("diastolic", "85")]))
        .is_ok());
}

#[test]
fn test_update_revalidates_replacement_dimensions() {
    let mut store = store_with(&[bp_fact_type()]);
    let fact = store
        .insert_fact(new_fact("bp", &[("systolic", "130"), ("diastolic", "85")]))
        .unwrap();

    let error = store
        .update_fact(
            fact.id,
            FactPatch {
                dimensions: Some(vec![DimensionEntry::new("systolic", "125")]),
                ..FactPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(error.code(), "E_VALIDATION_ERROR");

    // The stored fact is unchanged.
    let stored = store.fact(fact.id).unwrap();
    assert_eq!(stored.dimensions.len(), 2);
}

#[test]
fn test_update_without_dimensions_skips_validation() {
    let mut store = store_with(&[bp_fact_type()]);
    let fact = store
        .insert_fact(new_fact("bp", &[("systolic", "130"), ("diastolic", "85")]))
        .unwrap();

    let updated = store
        .update_fact(
            fact.id,
            FactPatch {
                person_id: Some(42),
                ..FactPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.person_id, Some(42));
    assert_eq!(updated.dimensions.len(), 2);
}

#[test]
fn test_unknown_type_key_is_not_found() {
    let mut store = store_with(&[bp_fact_type()]);
    let error = store.insert_fact(new_fact("ghost", &[])).unwrap_err();
    assert_eq!(error.status(), 404);
    assert_eq!(error.code(), "E_NOT_FOUND");
    assert!(matches!(error, EngineError::Catalog(_)));
}

#[test]
fn test_optional_dimension_may_be_absent() {
    let mut store = store_with(&[fact_type(
        "glucose",
        vec![
            dimension("mgdl", DimensionType::Number, true),
            dimension("fasting", DimensionType::Boolean, false),
        ],
    )]);
    assert!(store.insert_fact(new_fact("glucose", &[("mgdl", "95")])).is_ok());
}
