//! `SeaORM` Entity for the `analysis_history` table.
//!
//! Versioned AI analysis runs, keyed by `(organization_id, analysis_type,
//! reference_id, analysis_version)`. Unlike entity versions these rows carry
//! structured insight and metric payloads for cross-run comparison.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "analysis_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Kind of analysis, e.g. "brand_health" or "audience_profile".
    pub analysis_type: String,
    /// Identifier of the analyzed subject (tracking id, audience id, ...).
    pub reference_id: String,
    pub analysis_version: i32,
    /// Full analysis output as produced by the pipeline.
    #[sea_orm(column_type = "JsonBinary")]
    pub results: Json,
    /// Insight sentences extracted from the run, as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub ai_insights: Json,
    /// Named scalar metrics of the run, as a JSON object of numbers.
    #[sea_orm(column_type = "JsonBinary")]
    pub key_metrics: Json,
    #[sea_orm(column_type = "Double", nullable)]
    pub confidence: Option<f64>,
    /// Capture date of the underlying survey data, when known.
    pub data_source_date: Option<DateTimeWithTimeZone>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
