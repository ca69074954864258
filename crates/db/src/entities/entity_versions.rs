//! `SeaORM` Entity for the `entity_versions` table.
//!
//! One row per captured snapshot of a tracked entity. The `(organization_id,
//! entity_type, entity_id, version)` tuple is unique; `version` starts at 1
//! and increments per entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ChangeType, EntityType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entity_versions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub version: i32,
    /// Full snapshot of the entity at this version.
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,
    /// Field-level diff against the previous version; absent on first capture.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub delta: Option<Json>,
    /// Names of the fields that changed, in diff order.
    #[sea_orm(column_type = "JsonBinary")]
    pub changed_fields: Json,
    pub change_type: ChangeType,
    #[sea_orm(column_type = "Text")]
    pub change_summary: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
