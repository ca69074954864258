//! `SeaORM` Entity for the `change_trackers` table.
//!
//! One row per `(organization_id, user_id)` recording when the user last
//! visited and last acknowledged the change feed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_trackers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub last_visit: DateTimeWithTimeZone,
    /// When the user last marked changes as seen; never set for users who
    /// have visited but not acknowledged anything yet.
    pub last_seen_changes: Option<DateTimeWithTimeZone>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
