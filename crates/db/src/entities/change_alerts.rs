//! `SeaORM` Entity for the `change_alerts` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AlertSeverity, AlertType, EntityType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Metric that triggered the alert; absent for informational alerts.
    pub metric: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub previous_value: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub current_value: Option<f64>,
    /// Signed change as a fraction of the previous value (0.2 = +20%).
    #[sea_orm(column_type = "Double", nullable)]
    pub change_percent: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub threshold: Option<f64>,
    pub is_read: bool,
    pub is_dismissed: bool,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
