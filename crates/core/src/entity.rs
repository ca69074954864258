//! Tracked entity vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of platform entities whose changes are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Audience,
    Crosstab,
    Insight,
    Chart,
    Report,
    Dashboard,
    BrandTracking,
}

impl EntityType {
    /// Every tracked entity kind, in display order.
    pub const ALL: [EntityType; 7] = [
        EntityType::Audience,
        EntityType::Crosstab,
        EntityType::Insight,
        EntityType::Chart,
        EntityType::Report,
        EntityType::Dashboard,
        EntityType::BrandTracking,
    ];

    /// Wire/storage form of the entity kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityType::Audience => "audience",
            EntityType::Crosstab => "crosstab",
            EntityType::Insight => "insight",
            EntityType::Chart => "chart",
            EntityType::Report => "report",
            EntityType::Dashboard => "dashboard",
            EntityType::BrandTracking => "brand_tracking",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle event that produced a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Create,
    Update,
    Delete,
    Regenerate,
}

impl ChangeType {
    /// Wire/storage form of the change kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeType::Create => "CREATE",
            ChangeType::Update => "UPDATE",
            ChangeType::Delete => "DELETE",
            ChangeType::Regenerate => "REGENERATE",
        }
    }

    /// Whether this event carries a prior snapshot worth diffing against.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, ChangeType::Create)
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
