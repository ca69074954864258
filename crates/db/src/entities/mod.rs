//! `SeaORM` entities for the change-tracking schema.

pub mod analysis_history;
pub mod change_alerts;
pub mod change_summaries;
pub mod change_trackers;
pub mod entity_versions;
pub mod sea_orm_active_enums;

pub use sea_orm_active_enums::{AlertSeverity, AlertType, ChangeType, EntityType, SummaryPeriod};
