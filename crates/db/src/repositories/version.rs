//! Version repository for entity snapshot capture and history queries.
//!
//! Every tracked mutation lands here as an immutable `entity_versions` row.
//! Version numbers are per-entity and monotonic; concurrent captures for the
//! same entity are resolved optimistically against the unique version key.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use vantora_core::delta::{EntityDelta, compute_delta, snapshot_fields};
use vantora_core::entity::{ChangeType, EntityType};
use vantora_core::metrics::{display_name, numeric_field};
use vantora_core::trend::{TrendAnalysis, TrendPoint, analyze_metric};
use vantora_shared::AppError;
use vantora_shared::types::{PageRequest, PageResponse, TimeWindow};

use crate::entities::{entity_versions, sea_orm_active_enums::EntityType as DbEntityType};

/// How many times a capture retries after losing the version-number race.
const VERSION_INSERT_RETRIES: u32 = 3;

/// Error types for version operations.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// Supplied or stored snapshot is not a JSON object.
    #[error("Snapshot for entity {entity_id} is not a JSON object")]
    InvalidSnapshot {
        /// Entity whose snapshot was rejected.
        entity_id: String,
    },

    /// Concurrent writers kept claiming the next version number.
    #[error("Version capture for entity {entity_id} gave up after {attempts} attempts")]
    Contention {
        /// Entity the capture was for.
        entity_id: String,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Delta payload could not be serialized.
    #[error("Failed to serialize delta: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<VersionError> for AppError {
    fn from(err: VersionError) -> Self {
        let message = err.to_string();
        match err {
            VersionError::InvalidSnapshot { .. } => Self::Validation(message),
            VersionError::Contention { .. } => Self::Conflict(message),
            VersionError::Serialization(_) => Self::Serialization(message),
            VersionError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for capturing a new entity version.
#[derive(Debug, Clone)]
pub struct CaptureChangeInput {
    /// Organization that owns the entity.
    pub organization_id: Uuid,
    /// Kind of entity being tracked.
    pub entity_type: EntityType,
    /// Identifier of the entity within its type.
    pub entity_id: String,
    /// Full snapshot of the entity after the change.
    pub data: JsonValue,
    /// What kind of mutation produced this version.
    pub change_type: ChangeType,
    /// User who made the change, when known.
    pub created_by: Option<Uuid>,
}

/// Optional filters for version history queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryFilter {
    /// Only versions captured strictly after this instant.
    pub created_after: Option<DateTime<Utc>>,
    /// Only versions captured strictly before this instant.
    pub created_before: Option<DateTime<Utc>>,
}

/// Two versions of the same entity with the delta between them.
#[derive(Debug, Clone)]
pub struct VersionComparison {
    /// Chronologically earlier version (lower version number).
    pub before: entity_versions::Model,
    /// Chronologically later version.
    pub after: entity_versions::Model,
    /// Field-level diff from `before` to `after`, computed fresh.
    pub delta: EntityDelta,
}

/// Version repository for snapshot capture and history reads.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    db: DatabaseConnection,
}

impl VersionRepository {
    /// Creates a new version repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Capture
    // ========================================================================

    /// Captures a new version of an entity.
    ///
    /// Reads the latest stored version, assigns the next number, computes the
    /// delta against the prior snapshot (skipped for first captures and for
    /// CREATE), and inserts the row. Lost races on the version key are
    /// retried a small fixed number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The snapshot (supplied or stored prior) is not a JSON object
    /// - All retry attempts lose the version-number race
    /// - Database operation fails
    pub async fn capture_version(
        &self,
        input: CaptureChangeInput,
    ) -> Result<entity_versions::Model, VersionError> {
        let mut attempt = 0;
        loop {
            match self.try_capture(&input).await {
                Ok(stored) => return Ok(stored),
                Err(VersionError::Database(err))
                    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    attempt += 1;
                    if attempt >= VERSION_INSERT_RETRIES {
                        return Err(VersionError::Contention {
                            entity_id: input.entity_id,
                            attempts: attempt,
                        });
                    }
                    tracing::debug!(
                        entity_id = %input.entity_id,
                        attempt,
                        "version insert lost a race, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Single capture attempt: read latest, diff, insert, all in one transaction.
    async fn try_capture(
        &self,
        input: &CaptureChangeInput,
    ) -> Result<entity_versions::Model, VersionError> {
        let txn = self.db.begin().await?;

        let latest = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(input.organization_id))
            .filter(entity_versions::Column::EntityType.eq(DbEntityType::from(input.entity_type)))
            .filter(entity_versions::Column::EntityId.eq(&input.entity_id))
            .order_by_desc(entity_versions::Column::Version)
            .one(&txn)
            .await?;

        let next_version = latest.as_ref().map_or(1, |prior| prior.version + 1);

        let new_fields =
            snapshot_fields(&input.data, "current").map_err(|_| VersionError::InvalidSnapshot {
                entity_id: input.entity_id.clone(),
            })?;

        // A delta only makes sense against a prior snapshot, and a CREATE is
        // by definition not a change to diff.
        let delta = match &latest {
            Some(prior) if input.change_type.is_mutation() => {
                let old_fields = snapshot_fields(&prior.data, "previous").map_err(|_| {
                    VersionError::InvalidSnapshot {
                        entity_id: input.entity_id.clone(),
                    }
                })?;
                Some(compute_delta(old_fields, new_fields, input.entity_type))
            }
            _ => None,
        };

        let change_summary = match &delta {
            Some(d) => d.summary.clone(),
            None => format!(
                "Created {}: {}",
                input.entity_type,
                display_name(&input.data, &input.entity_id)
            ),
        };
        let changed_fields = match &delta {
            Some(d) => serde_json::to_value(&d.changed_field_names)?,
            None => JsonValue::Array(Vec::new()),
        };
        let delta_json = delta.as_ref().map(serde_json::to_value).transpose()?;

        let row = entity_versions::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            entity_type: Set(input.entity_type.into()),
            entity_id: Set(input.entity_id.clone()),
            version: Set(next_version),
            data: Set(input.data.clone()),
            delta: Set(delta_json),
            changed_fields: Set(changed_fields),
            change_type: Set(input.change_type.into()),
            change_summary: Set(change_summary),
            created_by: Set(input.created_by),
            created_at: Set(Utc::now().into()),
        };

        let stored = row.insert(&txn).await?;
        txn.commit().await?;
        Ok(stored)
    }

    // ========================================================================
    // Point Reads
    // ========================================================================

    /// Gets the latest version of an entity, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_latest_version(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<entity_versions::Model>, VersionError> {
        let row = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::EntityType.eq(DbEntityType::from(entity_type)))
            .filter(entity_versions::Column::EntityId.eq(entity_id))
            .order_by_desc(entity_versions::Column::Version)
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Gets one exact version of an entity, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_version(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        version: i32,
    ) -> Result<Option<entity_versions::Model>, VersionError> {
        let row = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::EntityType.eq(DbEntityType::from(entity_type)))
            .filter(entity_versions::Column::EntityId.eq(entity_id))
            .filter(entity_versions::Column::Version.eq(version))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Pages through an entity's version history, newest version first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_version_history(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        filter: HistoryFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<entity_versions::Model>, VersionError> {
        let mut query = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::EntityType.eq(DbEntityType::from(entity_type)))
            .filter(entity_versions::Column::EntityId.eq(entity_id));

        if let Some(after) = filter.created_after {
            query = query.filter(entity_versions::Column::CreatedAt.gt(after));
        }
        if let Some(before) = filter.created_before {
            query = query.filter(entity_versions::Column::CreatedAt.lt(before));
        }

        let total = query.clone().count(&self.db).await?;

        let items = query
            .order_by_desc(entity_versions::Column::Version)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(items, page, total))
    }

    /// Compares two stored versions of an entity.
    ///
    /// Returns `None` when either version does not exist. Endpoints are
    /// ordered chronologically regardless of argument order, so the lower
    /// version number is always `before`. The delta is recomputed from the
    /// stored snapshots rather than read back from the rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored snapshot is malformed or the database
    /// query fails.
    pub async fn compare_versions(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        version_a: i32,
        version_b: i32,
    ) -> Result<Option<VersionComparison>, VersionError> {
        let (low, high) = if version_a <= version_b {
            (version_a, version_b)
        } else {
            (version_b, version_a)
        };

        let Some(before) = self
            .get_version(organization_id, entity_type, entity_id, low)
            .await?
        else {
            return Ok(None);
        };
        let Some(after) = self
            .get_version(organization_id, entity_type, entity_id, high)
            .await?
        else {
            return Ok(None);
        };

        let invalid = |_| VersionError::InvalidSnapshot {
            entity_id: entity_id.to_string(),
        };
        let old_fields = snapshot_fields(&before.data, "previous").map_err(invalid)?;
        let new_fields = snapshot_fields(&after.data, "current").map_err(invalid)?;
        let delta = compute_delta(old_fields, new_fields, entity_type);

        Ok(Some(VersionComparison {
            before,
            after,
            delta,
        }))
    }

    // ========================================================================
    // Feed Queries
    // ========================================================================

    /// Lists all versions captured inside a time window, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn versions_in_window(
        &self,
        organization_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<entity_versions::Model>, VersionError> {
        let rows = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::CreatedAt.gte(window.start))
            .filter(entity_versions::Column::CreatedAt.lte(window.end))
            .order_by_asc(entity_versions::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Lists versions captured after an instant, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn changes_since(
        &self,
        organization_id: Uuid,
        since: DateTime<Utc>,
        entity_type: Option<EntityType>,
        limit: Option<u64>,
    ) -> Result<Vec<entity_versions::Model>, VersionError> {
        let mut query = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::CreatedAt.gt(since));

        if let Some(entity_type) = entity_type {
            query = query
                .filter(entity_versions::Column::EntityType.eq(DbEntityType::from(entity_type)));
        }

        let rows = query
            .order_by_desc(entity_versions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Counts versions captured after an instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_since(
        &self,
        organization_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<u64, VersionError> {
        let count = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::CreatedAt.gt(since))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    // ========================================================================
    // Metric Trends
    // ========================================================================

    /// Analyzes trends of numeric snapshot fields across recent versions.
    ///
    /// Loads the most recent `periods` versions, extracts each requested
    /// field where it is numeric, and runs trend analysis per metric.
    /// Metrics with fewer than two usable points are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn metric_trends(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        metrics: &[&str],
        periods: u64,
    ) -> Result<Vec<TrendAnalysis>, VersionError> {
        let mut rows = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::EntityType.eq(DbEntityType::from(entity_type)))
            .filter(entity_versions::Column::EntityId.eq(entity_id))
            .order_by_desc(entity_versions::Column::Version)
            .limit(periods)
            .all(&self.db)
            .await?;
        rows.reverse();

        let mut analyses = Vec::new();
        for metric in metrics {
            let points = metric_points(&rows, metric);
            if let Some(analysis) = analyze_metric(metric, points) {
                analyses.push(analysis);
            }
        }
        Ok(analyses)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extracts the chronological series of one numeric snapshot field.
///
/// Rows whose snapshot lacks the field, or holds a non-numeric value for it,
/// are skipped.
#[must_use]
pub fn metric_points(rows: &[entity_versions::Model], metric: &str) -> Vec<TrendPoint> {
    rows.iter()
        .filter_map(|row| {
            numeric_field(&row.data, metric)
                .map(|value| TrendPoint::new(row.created_at.with_timezone(&Utc), value))
        })
        .collect()
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
