//! Field-wise snapshot comparison.

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::entity::EntityType;

use super::error::DeltaError;
use super::significance::check_significance;
use super::summary::render_summary;
use super::types::{EntityDelta, FieldChangeType, FieldDelta};

/// Bookkeeping fields excluded from comparison.
const IGNORED_FIELDS: [&str; 4] = ["updatedAt", "createdAt", "id", "orgId"];

/// Borrow a snapshot's fields, rejecting non-object payloads.
///
/// # Errors
///
/// Returns [`DeltaError::NotAnObject`] when the snapshot is not a JSON
/// object.
pub fn snapshot_fields<'a>(
    data: &'a JsonValue,
    context: &'static str,
) -> Result<&'a JsonMap<String, JsonValue>, DeltaError> {
    data.as_object().ok_or(DeltaError::NotAnObject { context })
}

/// Compare two snapshots of an entity field by field.
///
/// Fields only present in `new_data` are additions, fields only present in
/// `old_data` are removals (both always significant), and fields present in
/// both with different values are modifications judged by the significance
/// rules. Fields in the ignore list never appear in the delta.
#[must_use]
pub fn compute_delta(
    old_data: &JsonMap<String, JsonValue>,
    new_data: &JsonMap<String, JsonValue>,
    entity_type: EntityType,
) -> EntityDelta {
    let mut fields = Vec::new();

    for (key, old_value) in old_data {
        if is_ignored(key) {
            continue;
        }
        match new_data.get(key) {
            None => fields.push(FieldDelta {
                field: key.clone(),
                old_value: Some(old_value.clone()),
                new_value: None,
                change_type: FieldChangeType::Removed,
                is_significant: true,
                change_percent: None,
            }),
            Some(new_value) if !deep_equal(old_value, new_value) => {
                let significance = check_significance(key, old_value, new_value, entity_type);
                fields.push(FieldDelta {
                    field: key.clone(),
                    old_value: Some(old_value.clone()),
                    new_value: Some(new_value.clone()),
                    change_type: FieldChangeType::Modified,
                    is_significant: significance.is_significant,
                    change_percent: significance.change_percent,
                });
            }
            Some(_) => {}
        }
    }

    for (key, new_value) in new_data {
        if is_ignored(key) || old_data.contains_key(key) {
            continue;
        }
        fields.push(FieldDelta {
            field: key.clone(),
            old_value: None,
            new_value: Some(new_value.clone()),
            change_type: FieldChangeType::Added,
            is_significant: true,
            change_percent: None,
        });
    }

    let changed_field_names: Vec<String> = fields.iter().map(|f| f.field.clone()).collect();
    let has_significant_changes = fields.iter().any(|f| f.is_significant);
    let summary = render_summary(&fields);

    EntityDelta { fields, changed_field_names, has_significant_changes, summary }
}

fn is_ignored(field: &str) -> bool {
    IGNORED_FIELDS.contains(&field)
}

/// Recursive structural equality with numbers compared by f64 value.
///
/// `1` and `1.0` are equal; object key order never matters.
#[must_use]
pub fn deep_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64() == y.as_f64(),
        (JsonValue::Array(x), JsonValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(u, v)| deep_equal(u, v))
        }
        (JsonValue::Object(x), JsonValue::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| deep_equal(v, w)))
        }
        _ => a == b,
    }
}
