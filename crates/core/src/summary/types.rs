//! Digest types persisted with change summaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{ChangeType, EntityType};

/// Granularity of a change summary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl SummaryPeriod {
    /// Wire/storage form of the period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SummaryPeriod::Daily => "daily",
            SummaryPeriod::Weekly => "weekly",
            SummaryPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One change in the window, as the digest needs to see it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    /// Kind of entity that changed.
    pub entity_type: EntityType,
    /// Platform identifier of the entity.
    pub entity_id: String,
    /// Lifecycle event that produced the version.
    pub change_type: ChangeType,
    /// Human-readable entity name.
    pub display_name: String,
    /// One-line change description, when one was recorded.
    pub summary: Option<String>,
    /// Whether the change's delta was significant.
    pub is_significant: bool,
}

/// One entry in the digest's notable-changes list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopChange {
    /// Kind of entity that changed.
    pub entity_type: EntityType,
    /// Platform identifier of the entity.
    pub entity_id: String,
    /// Human-readable entity name.
    pub name: String,
    /// One-line change description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Aggregated view of a window of changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDigest {
    /// Every change in the window, regeneration included.
    pub total_changes: i32,
    /// CREATE events.
    pub new_items: i32,
    /// UPDATE events.
    pub updated_items: i32,
    /// DELETE events.
    pub deleted_items: i32,
    /// Changes whose delta cleared the significance thresholds.
    pub significant_changes: i32,
    /// Change counts keyed by change kind.
    pub by_change_type: BTreeMap<String, i32>,
    /// Change counts keyed by entity kind.
    pub by_entity_type: BTreeMap<String, i32>,
    /// Notable changes, capped by the digest's top limit.
    pub top_changes: Vec<TopChange>,
}
