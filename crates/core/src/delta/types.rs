//! Delta types stored alongside entity versions.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// How a single field changed between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldChangeType {
    Added,
    Removed,
    Modified,
}

/// Change record for one field of an entity snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDelta {
    /// Field name as it appears in the snapshot.
    pub field: String,
    /// Value before the change. Absent for added fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<JsonValue>,
    /// Value after the change. Absent for removed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<JsonValue>,
    /// Whether the field was added, removed, or modified.
    pub change_type: FieldChangeType,
    /// Whether the change clears the significance thresholds.
    pub is_significant: bool,
    /// Fractional change for numeric modifications (0.2 = +20%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

/// Full delta between two consecutive snapshots of an entity.
///
/// Serializes with camelCase keys; this is the exact JSON shape persisted
/// in the version store's `delta` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDelta {
    /// Per-field change records.
    pub fields: Vec<FieldDelta>,
    /// Names of every changed field, in field order.
    pub changed_field_names: Vec<String>,
    /// True when at least one field change is significant.
    pub has_significant_changes: bool,
    /// One-line human-readable description of the delta.
    pub summary: String,
}

impl EntityDelta {
    /// True when the snapshots were identical outside the ignore list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
