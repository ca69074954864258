//! Property-based tests for the delta engine.

use proptest::prelude::*;
use serde_json::{Map as JsonMap, Value as JsonValue, json};

use crate::entity::EntityType;
use crate::metrics::change_fraction;

use super::engine::compute_delta;
use super::types::FieldChangeType;

/// Strategy to generate a scalar snapshot value.
fn scalar_value() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        any::<i32>().prop_map(|n| json!(n)),
        (-1.0e6..1.0e6f64).prop_map(|f| json!(f)),
        "[a-z]{0,8}".prop_map(|s| json!(s)),
        any::<bool>().prop_map(|b| json!(b)),
    ]
}

/// Strategy to generate a flat snapshot with a handful of fields.
fn snapshot() -> impl Strategy<Value = JsonMap<String, JsonValue>> {
    proptest::collection::btree_map("[a-z]{1,6}", scalar_value(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    /// Comparing a snapshot against itself never reports a change.
    #[test]
    fn prop_delta_of_identical_snapshots_is_empty(data in snapshot()) {
        let delta = compute_delta(&data, &data, EntityType::Audience);
        prop_assert!(delta.is_empty());
        prop_assert!(!delta.has_significant_changes);
        prop_assert_eq!(delta.summary.as_str(), "No changes detected");
    }

    /// The changed-field-name list mirrors the field records exactly.
    #[test]
    fn prop_changed_names_mirror_field_records(old in snapshot(), new in snapshot()) {
        let delta = compute_delta(&old, &new, EntityType::Report);
        prop_assert_eq!(delta.changed_field_names.len(), delta.fields.len());
        for (name, field) in delta.changed_field_names.iter().zip(&delta.fields) {
            prop_assert_eq!(name, &field.field);
        }
        let any_significant = delta.fields.iter().any(|f| f.is_significant);
        prop_assert_eq!(delta.has_significant_changes, any_significant);
    }

    /// Swapping the snapshots swaps additions and removals.
    #[test]
    fn prop_additions_and_removals_are_symmetric(old in snapshot(), new in snapshot()) {
        let forward = compute_delta(&old, &new, EntityType::Chart);
        let backward = compute_delta(&new, &old, EntityType::Chart);

        let mut removed: Vec<&str> = forward
            .fields
            .iter()
            .filter(|f| f.change_type == FieldChangeType::Removed)
            .map(|f| f.field.as_str())
            .collect();
        let mut added: Vec<&str> = backward
            .fields
            .iter()
            .filter(|f| f.change_type == FieldChangeType::Added)
            .map(|f| f.field.as_str())
            .collect();
        removed.sort_unstable();
        added.sort_unstable();
        prop_assert_eq!(removed, added);
    }

    /// An unchanged value is a zero fraction, whatever the base.
    #[test]
    fn prop_fraction_of_unchanged_value_is_zero(value in -1.0e6..1.0e6f64) {
        prop_assert_eq!(change_fraction(value, value), 0.0);
    }

    /// A move off a zero base always reads as a full move.
    #[test]
    fn prop_fraction_from_zero_base_is_full_move(current in 0.001..1.0e6f64) {
        prop_assert_eq!(change_fraction(0.0, current), 1.0);
        prop_assert_eq!(change_fraction(0.0, -current), 1.0);
    }

    /// The fraction's sign follows the direction of movement.
    #[test]
    fn prop_fraction_sign_follows_direction(previous in 1.0..1.0e6f64, step in 0.001..1.0e6f64) {
        prop_assert!(change_fraction(previous, previous + step) > 0.0);
        prop_assert!(change_fraction(previous, previous - step) < 0.0);
    }
}
