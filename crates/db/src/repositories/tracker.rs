//! Tracker repository for per-user change feed acknowledgement.
//!
//! One row per (organization, user) records when the user last visited the
//! change feed and when they last marked it as seen. Unseen counts are
//! derived from the version store against that acknowledgement time.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use vantora_shared::AppError;

use crate::entities::{change_trackers, entity_versions};

/// Error types for tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Tracker repository for visit and acknowledgement state.
#[derive(Debug, Clone)]
pub struct TrackerRepository {
    db: DatabaseConnection,
}

impl TrackerRepository {
    /// Creates a new tracker repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records that the user visited the change feed just now.
    ///
    /// First visits create the tracker row without an acknowledgement time,
    /// so everything still counts as unseen.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn record_visit(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<change_trackers::Model, TrackerError> {
        let now = Utc::now().into();

        if let Some(tracker) = self.get_tracker(organization_id, user_id).await? {
            let mut active: change_trackers::ActiveModel = tracker.into();
            active.last_visit = Set(now);
            active.updated_at = Set(now);
            return Ok(active.update(&self.db).await?);
        }

        let row = change_trackers::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            user_id: Set(user_id),
            last_visit: Set(now),
            last_seen_changes: Set(None),
            updated_at: Set(now),
        };
        Ok(row.insert(&self.db).await?)
    }

    /// Marks all current changes as seen by the user just now.
    ///
    /// Creating the row on the fly also counts as a visit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn mark_changes_seen(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<change_trackers::Model, TrackerError> {
        let now = Utc::now().into();

        if let Some(tracker) = self.get_tracker(organization_id, user_id).await? {
            let mut active: change_trackers::ActiveModel = tracker.into();
            active.last_seen_changes = Set(Some(now));
            active.updated_at = Set(now);
            return Ok(active.update(&self.db).await?);
        }

        let row = change_trackers::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            user_id: Set(user_id),
            last_visit: Set(now),
            last_seen_changes: Set(Some(now)),
            updated_at: Set(now),
        };
        Ok(row.insert(&self.db).await?)
    }

    /// Gets the user's tracker row, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_tracker(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<change_trackers::Model>, TrackerError> {
        let row = change_trackers::Entity::find()
            .filter(change_trackers::Column::OrganizationId.eq(organization_id))
            .filter(change_trackers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Counts versions the user has not yet acknowledged.
    ///
    /// Users without a tracker row, or who have never marked changes seen,
    /// see every version of the organization as unseen.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unseen_change_count(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, TrackerError> {
        let last_seen = self
            .get_tracker(organization_id, user_id)
            .await?
            .and_then(|tracker| tracker.last_seen_changes);

        let mut query = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id));
        if let Some(seen_at) = last_seen {
            query = query.filter(entity_versions::Column::CreatedAt.gt(seen_at));
        }

        Ok(query.count(&self.db).await?)
    }
}
