//! The hook surface the platform's CRUD layer calls into.
//!
//! Each hook runs after its primary mutation has already committed, so the
//! contract here is strict: record what we can, log what we cannot, and
//! never hand an error back to the caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde_json::Value as JsonValue;
use tracing::warn;
use uuid::Uuid;

use vantora_core::alerting::MetricChange;
use vantora_core::entity::{ChangeType, EntityType};
use vantora_core::metrics::{display_name, numeric_field};
use vantora_db::{
    AlertRepository, AnalysisHistoryRepository, VersionRepository,
    repositories::{analysis::RecordAnalysisInput, version::CaptureChangeInput},
};

use crate::outcome::TrackingOutcome;

/// Metric fields checked for threshold crossings after an update.
pub const WATCHED_METRICS: [&str; 9] = [
    "size",
    "brandHealth",
    "marketShare",
    "nps",
    "sentiment",
    "awareness",
    "consideration",
    "preference",
    "loyalty",
];

/// Optional extras for [`ChangeHooks::on_analysis_completed`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Model confidence score for the run, when the pipeline reports one.
    pub confidence: Option<f64>,
    /// Timestamp of the underlying data extract.
    pub data_source_date: Option<DateTime<Utc>>,
    /// User who triggered the analysis.
    pub triggered_by: Option<Uuid>,
}

/// Entry points the platform calls after entity and analysis mutations.
#[derive(Debug, Clone)]
pub struct ChangeHooks {
    versions: VersionRepository,
    alerts: AlertRepository,
    analyses: AnalysisHistoryRepository,
}

impl ChangeHooks {
    /// Creates the hook surface over one database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            versions: VersionRepository::new(db.clone()),
            alerts: AlertRepository::new(db.clone()),
            analyses: AnalysisHistoryRepository::new(db),
        }
    }

    // ========================================================================
    // Entity Lifecycle
    // ========================================================================

    /// Records a CREATE snapshot for a newly created entity.
    pub async fn on_entity_created(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        data: JsonValue,
        user_id: Option<Uuid>,
    ) -> TrackingOutcome {
        self.capture(
            organization_id,
            entity_type,
            entity_id,
            data,
            ChangeType::Create,
            user_id,
        )
        .await
    }

    /// Records an UPDATE snapshot, then checks watched metrics for threshold
    /// crossings and raises alerts for any that fired.
    pub async fn on_entity_updated(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        previous_data: &JsonValue,
        new_data: JsonValue,
        user_id: Option<Uuid>,
    ) -> TrackingOutcome {
        let metrics = watched_metric_changes(previous_data, &new_data);

        let stored = match self
            .versions
            .capture_version(CaptureChangeInput {
                organization_id,
                entity_type,
                entity_id: entity_id.to_string(),
                data: new_data,
                change_type: ChangeType::Update,
                created_by: user_id,
            })
            .await
        {
            Ok(stored) => stored,
            Err(err) => {
                warn!(entity_id = %entity_id, error = %err, "Failed to capture entity update");
                return TrackingOutcome::Failed(err.into());
            }
        };

        let mut alerts_raised = 0;
        if !metrics.is_empty() {
            let entity_name = display_name(&stored.data, entity_id);
            match self
                .alerts
                .check_thresholds_and_alert(
                    organization_id,
                    entity_type,
                    entity_id,
                    &entity_name,
                    &metrics,
                    None,
                )
                .await
            {
                Ok(raised) => alerts_raised = raised.len(),
                // The snapshot is already recorded; a failed alert write must
                // not undo that.
                Err(err) => {
                    warn!(entity_id = %entity_id, error = %err, "Failed to raise threshold alerts");
                }
            }
        }

        TrackingOutcome::Recorded {
            version: Some(stored.version),
            alerts_raised,
        }
    }

    /// Records a DELETE snapshot holding the entity's final state.
    pub async fn on_entity_deleted(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        deleted_data: JsonValue,
        user_id: Option<Uuid>,
    ) -> TrackingOutcome {
        self.capture(
            organization_id,
            entity_type,
            entity_id,
            deleted_data,
            ChangeType::Delete,
            user_id,
        )
        .await
    }

    /// Records a REGENERATE snapshot after AI content was rebuilt.
    pub async fn on_ai_content_regenerated(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        data: JsonValue,
        user_id: Option<Uuid>,
    ) -> TrackingOutcome {
        self.capture(
            organization_id,
            entity_type,
            entity_id,
            data,
            ChangeType::Regenerate,
            user_id,
        )
        .await
    }

    /// Shared capture path for the entity lifecycle hooks.
    async fn capture(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        data: JsonValue,
        change_type: ChangeType,
        user_id: Option<Uuid>,
    ) -> TrackingOutcome {
        match self
            .versions
            .capture_version(CaptureChangeInput {
                organization_id,
                entity_type,
                entity_id: entity_id.to_string(),
                data,
                change_type,
                created_by: user_id,
            })
            .await
        {
            Ok(stored) => TrackingOutcome::Recorded {
                version: Some(stored.version),
                alerts_raised: 0,
            },
            Err(err) => {
                warn!(
                    entity_id = %entity_id,
                    change = %change_type,
                    error = %err,
                    "Failed to capture entity version"
                );
                TrackingOutcome::Failed(err.into())
            }
        }
    }

    // ========================================================================
    // Analysis Lifecycle
    // ========================================================================

    /// Records a completed analysis run as a new analysis version.
    pub async fn on_analysis_completed(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
        results: JsonValue,
        ai_insights: Vec<String>,
        key_metrics: BTreeMap<String, f64>,
        options: AnalysisOptions,
    ) -> TrackingOutcome {
        match self
            .analyses
            .record_analysis(RecordAnalysisInput {
                organization_id,
                analysis_type: analysis_type.to_string(),
                reference_id: reference_id.to_string(),
                results,
                ai_insights,
                key_metrics,
                confidence: options.confidence,
                data_source_date: options.data_source_date,
                created_by: options.triggered_by,
            })
            .await
        {
            Ok(stored) => TrackingOutcome::Recorded {
                version: Some(stored.analysis_version),
                alerts_raised: 0,
            },
            Err(err) => {
                warn!(reference_id = %reference_id, error = %err, "Failed to record analysis run");
                TrackingOutcome::Failed(err.into())
            }
        }
    }

    // ========================================================================
    // Data Refresh
    // ========================================================================

    /// Raises an informational alert that fresh data landed for an entity.
    pub async fn on_new_data_available(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        description: &str,
    ) -> TrackingOutcome {
        match self
            .alerts
            .new_data_alert(organization_id, entity_type, entity_id, description)
            .await
        {
            Ok(_) => TrackingOutcome::Recorded {
                version: None,
                alerts_raised: 1,
            },
            Err(err) => {
                warn!(entity_id = %entity_id, error = %err, "Failed to raise new data alert");
                TrackingOutcome::Failed(err.into())
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the before/after map of watched metrics present as numbers in both
/// snapshots.
#[must_use]
pub fn watched_metric_changes(
    previous: &JsonValue,
    current: &JsonValue,
) -> BTreeMap<String, MetricChange> {
    let mut changes = BTreeMap::new();
    for metric in WATCHED_METRICS {
        let (Some(before), Some(after)) =
            (numeric_field(previous, metric), numeric_field(current, metric))
        else {
            continue;
        };
        changes.insert(metric.to_string(), MetricChange::new(before, after));
    }
    changes
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
