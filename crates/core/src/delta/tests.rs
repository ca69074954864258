//! Unit tests for the delta engine and summary rendering.

use serde_json::{Map as JsonMap, Value as JsonValue, json};

use crate::entity::EntityType;

use super::engine::{compute_delta, deep_equal, snapshot_fields};
use super::error::DeltaError;
use super::significance::check_significance;
use super::summary::render_summary;
use super::types::{FieldChangeType, FieldDelta};

fn snapshot(value: JsonValue) -> JsonMap<String, JsonValue> {
    value.as_object().expect("test snapshot must be an object").clone()
}

#[test]
fn test_identical_snapshots_produce_empty_delta() {
    let data = snapshot(json!({"name": "Gen Z", "size": 15000, "tags": ["core", "youth"]}));

    let delta = compute_delta(&data, &data, EntityType::Audience);

    assert!(delta.is_empty());
    assert!(delta.changed_field_names.is_empty());
    assert!(!delta.has_significant_changes);
    assert_eq!(delta.summary, "No changes detected");
}

#[test]
fn test_added_field_is_always_significant() {
    let old = snapshot(json!({"name": "Gen Z"}));
    let new = snapshot(json!({"name": "Gen Z", "segment": "urban"}));

    let delta = compute_delta(&old, &new, EntityType::Audience);

    assert_eq!(delta.fields.len(), 1);
    let field = &delta.fields[0];
    assert_eq!(field.field, "segment");
    assert_eq!(field.change_type, FieldChangeType::Added);
    assert!(field.is_significant);
    assert_eq!(field.old_value, None);
    assert_eq!(field.new_value, Some(json!("urban")));
    assert_eq!(field.change_percent, None);
}

#[test]
fn test_removed_field_is_always_significant() {
    let old = snapshot(json!({"name": "Gen Z", "segment": "urban"}));
    let new = snapshot(json!({"name": "Gen Z"}));

    let delta = compute_delta(&old, &new, EntityType::Audience);

    assert_eq!(delta.fields.len(), 1);
    let field = &delta.fields[0];
    assert_eq!(field.change_type, FieldChangeType::Removed);
    assert!(field.is_significant);
    assert_eq!(field.new_value, None);
}

#[test]
fn test_audience_size_clears_ten_percent_threshold() {
    let old = snapshot(json!({"audience_size": 1000}));
    let new = snapshot(json!({"audience_size": 1200}));

    let delta = compute_delta(&old, &new, EntityType::Audience);

    let field = &delta.fields[0];
    assert!(field.is_significant);
    let pct = field.change_percent.expect("numeric change carries a fraction");
    assert!((pct - 0.2).abs() < 1e-12);
    assert!(delta.has_significant_changes);
}

#[test]
fn test_audience_size_below_threshold_is_minor() {
    let old = snapshot(json!({"audience_size": 1000}));
    let new = snapshot(json!({"audience_size": 1050}));

    let delta = compute_delta(&old, &new, EntityType::Audience);

    let field = &delta.fields[0];
    assert!(!field.is_significant);
    assert!(!delta.has_significant_changes);
    assert_eq!(delta.summary, "1 minor change");
}

#[test]
fn test_brand_health_uses_absolute_threshold() {
    let below = check_significance(
        "brand_health",
        &json!(80.0),
        &json!(76.0),
        EntityType::BrandTracking,
    );
    assert!(!below.is_significant);

    let above = check_significance(
        "brand_health",
        &json!(80.0),
        &json!(74.0),
        EntityType::BrandTracking,
    );
    assert!(above.is_significant);
}

#[test]
fn test_non_numeric_modification_is_always_significant() {
    let old = snapshot(json!({"status": "active"}));
    let new = snapshot(json!({"status": "archived"}));

    let delta = compute_delta(&old, &new, EntityType::Report);

    let field = &delta.fields[0];
    assert_eq!(field.change_type, FieldChangeType::Modified);
    assert!(field.is_significant);
    assert_eq!(field.change_percent, None);
    assert_eq!(delta.summary, "status changed");
}

#[test]
fn test_bookkeeping_fields_are_ignored() {
    let old = snapshot(json!({
        "name": "Q3 Report",
        "updatedAt": "2026-07-01T00:00:00Z",
        "createdAt": "2026-01-01T00:00:00Z",
        "id": "rep-1",
        "orgId": "org-1"
    }));
    let new = snapshot(json!({
        "name": "Q3 Report",
        "updatedAt": "2026-08-01T00:00:00Z",
        "createdAt": "2026-01-01T00:00:00Z",
        "id": "rep-2",
        "orgId": "org-2"
    }));

    let delta = compute_delta(&old, &new, EntityType::Report);

    assert!(delta.is_empty());
}

#[test]
fn test_priority_field_headlines_the_summary() {
    let old = snapshot(json!({"size": 1000, "awareness": 0.40}));
    let new = snapshot(json!({"size": 1500, "awareness": 0.50}));

    let delta = compute_delta(&old, &new, EntityType::Audience);

    // Both changes are significant; `size` wins the headline.
    assert_eq!(delta.fields.len(), 2);
    assert!(delta.has_significant_changes);
    assert_eq!(delta.summary, "size increased (+50.0%)");
}

#[test]
fn test_decrease_renders_with_signed_percent() {
    let old = snapshot(json!({"marketShare": 0.40}));
    let new = snapshot(json!({"marketShare": 0.30}));

    let delta = compute_delta(&old, &new, EntityType::BrandTracking);

    assert_eq!(delta.summary, "marketShare decreased (-25.0%)");
}

#[test]
fn test_non_priority_significant_changes_are_counted() {
    let old = snapshot(json!({"sentiment": 0.50, "awareness": 0.40}));
    let new = snapshot(json!({"sentiment": 0.20, "awareness": 0.50}));

    let delta = compute_delta(&old, &new, EntityType::BrandTracking);

    assert_eq!(delta.summary, "2 significant changes");
}

#[test]
fn test_minor_changes_are_counted() {
    let old = snapshot(json!({"views": 100, "clicks": 50}));
    let new = snapshot(json!({"views": 105, "clicks": 52}));

    let delta = compute_delta(&old, &new, EntityType::Dashboard);

    assert!(!delta.has_significant_changes);
    assert_eq!(delta.summary, "2 minor changes");
}

#[test]
fn test_delta_serializes_camel_case() {
    let old = snapshot(json!({"size": 1000}));
    let new = snapshot(json!({"size": 2000}));

    let delta = compute_delta(&old, &new, EntityType::Audience);
    let value = serde_json::to_value(&delta).unwrap();

    assert!(value.get("hasSignificantChanges").is_some());
    assert!(value.get("changedFieldNames").is_some());
    let field = &value["fields"][0];
    assert_eq!(field["changeType"], json!("modified"));
    assert_eq!(field["oldValue"], json!(1000));
    assert_eq!(field["newValue"], json!(2000));
    assert!(field.get("changePercent").is_some());
    assert!(field.get("isSignificant").is_some());
}

#[test]
fn test_deep_equal_compares_numbers_by_value() {
    assert!(deep_equal(&json!(1), &json!(1.0)));
    assert!(deep_equal(&json!({"a": {"b": 2}}), &json!({"a": {"b": 2.0}})));
    assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
    assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    assert!(!deep_equal(&json!("1"), &json!(1)));
}

#[test]
fn test_nested_structures_compare_structurally() {
    let old = snapshot(json!({"config": {"filters": [{"field": "age", "op": "gt"}]}}));
    let new = snapshot(json!({"config": {"filters": [{"op": "gt", "field": "age"}]}}));

    let delta = compute_delta(&old, &new, EntityType::Crosstab);

    assert!(delta.is_empty());
}

#[test]
fn test_snapshot_fields_rejects_non_objects() {
    assert!(snapshot_fields(&json!({"a": 1}), "current").is_ok());
    assert_eq!(
        snapshot_fields(&json!([1, 2]), "current"),
        Err(DeltaError::NotAnObject { context: "current" })
    );
    assert_eq!(
        snapshot_fields(&json!(null), "previous"),
        Err(DeltaError::NotAnObject { context: "previous" })
    );
}

#[test]
fn test_changed_field_names_track_field_order() {
    let old = snapshot(json!({"alpha": 1, "zeta": 2}));
    let new = snapshot(json!({"alpha": 9, "beta": 3}));

    let delta = compute_delta(&old, &new, EntityType::Chart);

    let names: Vec<&str> = delta.changed_field_names.iter().map(String::as_str).collect();
    let from_fields: Vec<&str> = delta.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(names, from_fields);
    assert_eq!(names.len(), 3);
}

#[test]
fn test_summary_handles_added_priority_field() {
    let fields = vec![FieldDelta {
        field: "name".to_string(),
        old_value: None,
        new_value: Some(json!("Renamed")),
        change_type: FieldChangeType::Added,
        is_significant: true,
        change_percent: None,
    }];

    assert_eq!(render_summary(&fields), "name added");
}
