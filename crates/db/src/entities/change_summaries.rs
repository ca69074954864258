//! `SeaORM` Entity for the `change_summaries` table.
//!
//! Pre-aggregated digests of change activity per `(organization_id, period,
//! period_start, summary_type)`. Regenerating a digest for the same window
//! overwrites the existing row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::SummaryPeriod;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_summaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub period: SummaryPeriod,
    pub period_start: DateTimeWithTimeZone,
    pub period_end: DateTimeWithTimeZone,
    /// Digest flavor, e.g. "overview" or a single report area.
    pub summary_type: String,
    pub total_changes: i32,
    pub new_items: i32,
    pub updated_items: i32,
    pub deleted_items: i32,
    pub significant_changes: i32,
    /// Human-readable highlight sentences.
    #[sea_orm(column_type = "JsonBinary")]
    pub highlights: Json,
    /// Most notable changes of the window, capped and in chronological order.
    #[sea_orm(column_type = "JsonBinary")]
    pub top_changes: Json,
    /// Aggregate counters bag (totals by change type, entity type, alerts).
    #[sea_orm(column_type = "JsonBinary")]
    pub metrics: Json,
    pub generated_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
