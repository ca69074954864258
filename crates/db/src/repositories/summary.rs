//! Summary repository for periodic change digests.
//!
//! Aggregation itself is pure and lives in `vantora_core::summary`; this
//! module loads the window's versions, counts alerts, and upserts the digest
//! row keyed by (organization, period, period start, summary type).

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use vantora_core::delta::EntityDelta;
use vantora_core::metrics::display_name;
use vantora_core::summary::{ChangeRecord, SummaryPeriod, build_highlights, digest_changes};
use vantora_shared::AppError;
use vantora_shared::types::TimeWindow;

use crate::entities::{
    change_alerts, change_summaries, entity_versions,
    sea_orm_active_enums::{AlertSeverity as DbAlertSeverity, SummaryPeriod as DbSummaryPeriod},
};

/// Error types for summary operations.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Digest payload could not be serialized.
    #[error("Failed to serialize digest: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        let message = err.to_string();
        match err {
            SummaryError::Serialization(_) => Self::Serialization(message),
            SummaryError::Database(_) => Self::Database(message),
        }
    }
}

/// Summary repository for digest generation and reads.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generates (or regenerates) the digest for one summary window.
    ///
    /// Loads every version captured inside the window, folds it into counts,
    /// highlights, and top changes, and upserts the row for
    /// (organization, period, window start, `summary_type`). Calling this
    /// again for the same key overwrites the previous digest, so retries
    /// never produce duplicate rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a payload cannot be serialized or a database
    /// operation fails.
    pub async fn generate_summary(
        &self,
        organization_id: Uuid,
        period: SummaryPeriod,
        window: &TimeWindow,
        summary_type: &str,
        top_limit: usize,
    ) -> Result<change_summaries::Model, SummaryError> {
        let rows = entity_versions::Entity::find()
            .filter(entity_versions::Column::OrganizationId.eq(organization_id))
            .filter(entity_versions::Column::CreatedAt.gte(window.start))
            .filter(entity_versions::Column::CreatedAt.lte(window.end))
            .order_by_asc(entity_versions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let records: Vec<ChangeRecord> = rows.iter().map(change_record).collect();
        let digest = digest_changes(&records, top_limit);

        let critical_alerts = self
            .alert_count(organization_id, window, Some(DbAlertSeverity::Critical))
            .await?;
        let alert_count = self.alert_count(organization_id, window, None).await?;

        let highlights = build_highlights(&digest, critical_alerts);

        let highlights_json = serde_json::to_value(&highlights)?;
        let top_changes_json = serde_json::to_value(&digest.top_changes)?;
        let metrics_json = serde_json::json!({
            "totalChanges": digest.total_changes,
            "byChangeType": digest.by_change_type,
            "byEntityType": digest.by_entity_type,
            "alertCount": alert_count,
        });

        let now = Utc::now().into();

        let existing = change_summaries::Entity::find()
            .filter(change_summaries::Column::OrganizationId.eq(organization_id))
            .filter(change_summaries::Column::Period.eq(DbSummaryPeriod::from(period)))
            .filter(change_summaries::Column::PeriodStart.eq(window.start))
            .filter(change_summaries::Column::SummaryType.eq(summary_type))
            .one(&self.db)
            .await?;

        if let Some(current) = existing {
            let mut active: change_summaries::ActiveModel = current.into();
            active.period_end = Set(window.end.into());
            active.total_changes = Set(digest.total_changes);
            active.new_items = Set(digest.new_items);
            active.updated_items = Set(digest.updated_items);
            active.deleted_items = Set(digest.deleted_items);
            active.significant_changes = Set(digest.significant_changes);
            active.highlights = Set(highlights_json);
            active.top_changes = Set(top_changes_json);
            active.metrics = Set(metrics_json);
            active.generated_at = Set(now);
            return Ok(active.update(&self.db).await?);
        }

        let row = change_summaries::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            period: Set(period.into()),
            period_start: Set(window.start.into()),
            period_end: Set(window.end.into()),
            summary_type: Set(summary_type.to_string()),
            total_changes: Set(digest.total_changes),
            new_items: Set(digest.new_items),
            updated_items: Set(digest.updated_items),
            deleted_items: Set(digest.deleted_items),
            significant_changes: Set(digest.significant_changes),
            highlights: Set(highlights_json),
            top_changes: Set(top_changes_json),
            metrics: Set(metrics_json),
            generated_at: Set(now),
            created_at: Set(now),
        };
        Ok(row.insert(&self.db).await?)
    }

    /// Counts alerts in the window, optionally restricted to one severity.
    async fn alert_count(
        &self,
        organization_id: Uuid,
        window: &TimeWindow,
        severity: Option<DbAlertSeverity>,
    ) -> Result<u64, SummaryError> {
        let mut query = change_alerts::Entity::find()
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .filter(change_alerts::Column::CreatedAt.gte(window.start))
            .filter(change_alerts::Column::CreatedAt.lte(window.end));
        if let Some(severity) = severity {
            query = query.filter(change_alerts::Column::Severity.eq(severity));
        }
        Ok(query.count(&self.db).await?)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Gets the digest for one exact summary key, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_summary(
        &self,
        organization_id: Uuid,
        period: SummaryPeriod,
        period_start: DateTime<Utc>,
        summary_type: &str,
    ) -> Result<Option<change_summaries::Model>, SummaryError> {
        let row = change_summaries::Entity::find()
            .filter(change_summaries::Column::OrganizationId.eq(organization_id))
            .filter(change_summaries::Column::Period.eq(DbSummaryPeriod::from(period)))
            .filter(change_summaries::Column::PeriodStart.eq(period_start))
            .filter(change_summaries::Column::SummaryType.eq(summary_type))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Lists the most recent digests, newest window first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_summaries(
        &self,
        organization_id: Uuid,
        period: Option<SummaryPeriod>,
        limit: u64,
    ) -> Result<Vec<change_summaries::Model>, SummaryError> {
        let mut query = change_summaries::Entity::find()
            .filter(change_summaries::Column::OrganizationId.eq(organization_id));
        if let Some(period) = period {
            query =
                query.filter(change_summaries::Column::Period.eq(DbSummaryPeriod::from(period)));
        }
        let rows = query
            .order_by_desc(change_summaries::Column::PeriodStart)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts a stored version row into the aggregator's change record.
///
/// Prefers the stored delta's summary and significance flag; rows without a
/// parseable delta read as insignificant and fall back to the capture summary.
#[must_use]
pub fn change_record(row: &entity_versions::Model) -> ChangeRecord {
    let delta = row
        .delta
        .as_ref()
        .and_then(|raw| serde_json::from_value::<EntityDelta>(raw.clone()).ok());

    ChangeRecord {
        entity_type: row.entity_type.into(),
        entity_id: row.entity_id.clone(),
        change_type: row.change_type.into(),
        display_name: display_name(&row.data, &row.entity_id),
        summary: Some(
            delta
                .as_ref()
                .map_or_else(|| row.change_summary.clone(), |d| d.summary.clone()),
        ),
        is_significant: delta.is_some_and(|d| d.has_significant_changes),
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
