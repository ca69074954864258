//! Analysis history repository for versioned AI analysis runs.
//!
//! Runs are append-only with their own monotonic version counter per
//! (organization, analysis type, reference). Comparison operations surface
//! how insights and key metrics evolved between two runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use vantora_core::evolution::{InsightEvolution, KeyMetricDelta, compare_insights, metric_deltas};
use vantora_core::trend::{TrendAnalysis, TrendPoint, TrendShift, analyze_metric, detect_shifts};
use vantora_shared::AppError;

use crate::entities::analysis_history;

/// How many times a record retries after losing the version-number race.
const ANALYSIS_INSERT_RETRIES: u32 = 3;

/// Error types for analysis history operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Concurrent writers kept claiming the next analysis version.
    #[error("Analysis record for {reference_id} gave up after {attempts} attempts")]
    Contention {
        /// Reference the record was for.
        reference_id: String,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Insight or metric payload could not be serialized.
    #[error("Failed to serialize analysis payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let message = err.to_string();
        match err {
            AnalysisError::Contention { .. } => Self::Conflict(message),
            AnalysisError::Serialization(_) => Self::Serialization(message),
            AnalysisError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for recording a completed analysis run.
#[derive(Debug, Clone)]
pub struct RecordAnalysisInput {
    /// Organization the analysis belongs to.
    pub organization_id: Uuid,
    /// Kind of analysis, e.g. "brand_health".
    pub analysis_type: String,
    /// Identifier of the analyzed subject.
    pub reference_id: String,
    /// Full analysis output.
    pub results: JsonValue,
    /// Insight sentences extracted from the run.
    pub ai_insights: Vec<String>,
    /// Named scalar metrics of the run.
    pub key_metrics: BTreeMap<String, f64>,
    /// Model confidence for the run, when reported.
    pub confidence: Option<f64>,
    /// Capture date of the underlying survey data, when known.
    pub data_source_date: Option<DateTime<Utc>>,
    /// User who initiated the run, when known.
    pub created_by: Option<Uuid>,
}

/// Two analysis runs with their insight and metric evolution.
#[derive(Debug, Clone)]
pub struct AnalysisComparison {
    /// Chronologically earlier run (lower analysis version).
    pub before: analysis_history::Model,
    /// Chronologically later run.
    pub after: analysis_history::Model,
    /// How the insight set changed between the runs.
    pub insight_evolution: InsightEvolution,
    /// Per-metric movement over the union of both runs' metric names.
    pub metric_deltas: Vec<KeyMetricDelta>,
}

/// Analysis history repository.
#[derive(Debug, Clone)]
pub struct AnalysisHistoryRepository {
    db: DatabaseConnection,
}

impl AnalysisHistoryRepository {
    /// Creates a new analysis history repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Records a completed analysis run as the next version for its subject.
    ///
    /// Lost races on the version key are retried a small fixed number of
    /// times, mirroring entity version capture.
    ///
    /// # Errors
    ///
    /// Returns an error if all retries lose the race, a payload cannot be
    /// serialized, or a database operation fails.
    pub async fn record_analysis(
        &self,
        input: RecordAnalysisInput,
    ) -> Result<analysis_history::Model, AnalysisError> {
        let mut attempt = 0;
        loop {
            match self.try_record(&input).await {
                Ok(stored) => return Ok(stored),
                Err(AnalysisError::Database(err))
                    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    attempt += 1;
                    if attempt >= ANALYSIS_INSERT_RETRIES {
                        return Err(AnalysisError::Contention {
                            reference_id: input.reference_id,
                            attempts: attempt,
                        });
                    }
                    tracing::debug!(
                        reference_id = %input.reference_id,
                        attempt,
                        "analysis insert lost a race, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Single record attempt: read latest version, insert next, one transaction.
    async fn try_record(
        &self,
        input: &RecordAnalysisInput,
    ) -> Result<analysis_history::Model, AnalysisError> {
        let txn = self.db.begin().await?;

        let latest: Option<i32> = analysis_history::Entity::find()
            .select_only()
            .column(analysis_history::Column::AnalysisVersion)
            .filter(analysis_history::Column::OrganizationId.eq(input.organization_id))
            .filter(analysis_history::Column::AnalysisType.eq(&input.analysis_type))
            .filter(analysis_history::Column::ReferenceId.eq(&input.reference_id))
            .order_by_desc(analysis_history::Column::AnalysisVersion)
            .into_tuple()
            .one(&txn)
            .await?;

        let next_version = latest.map_or(1, |version| version + 1);

        let row = analysis_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            analysis_type: Set(input.analysis_type.clone()),
            reference_id: Set(input.reference_id.clone()),
            analysis_version: Set(next_version),
            results: Set(input.results.clone()),
            ai_insights: Set(serde_json::to_value(&input.ai_insights)?),
            key_metrics: Set(serde_json::to_value(&input.key_metrics)?),
            confidence: Set(input.confidence),
            data_source_date: Set(input.data_source_date.map(Into::into)),
            created_by: Set(input.created_by),
            created_at: Set(Utc::now().into()),
        };

        let stored = row.insert(&txn).await?;
        txn.commit().await?;
        Ok(stored)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Lists the most recent runs for a subject, newest version first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_history(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
        limit: u64,
    ) -> Result<Vec<analysis_history::Model>, AnalysisError> {
        let rows = analysis_history::Entity::find()
            .filter(analysis_history::Column::OrganizationId.eq(organization_id))
            .filter(analysis_history::Column::AnalysisType.eq(analysis_type))
            .filter(analysis_history::Column::ReferenceId.eq(reference_id))
            .order_by_desc(analysis_history::Column::AnalysisVersion)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Gets the latest run for a subject, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn latest(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
    ) -> Result<Option<analysis_history::Model>, AnalysisError> {
        let row = analysis_history::Entity::find()
            .filter(analysis_history::Column::OrganizationId.eq(organization_id))
            .filter(analysis_history::Column::AnalysisType.eq(analysis_type))
            .filter(analysis_history::Column::ReferenceId.eq(reference_id))
            .order_by_desc(analysis_history::Column::AnalysisVersion)
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Gets one exact analysis version, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_analysis_version(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
        version: i32,
    ) -> Result<Option<analysis_history::Model>, AnalysisError> {
        let row = analysis_history::Entity::find()
            .filter(analysis_history::Column::OrganizationId.eq(organization_id))
            .filter(analysis_history::Column::AnalysisType.eq(analysis_type))
            .filter(analysis_history::Column::ReferenceId.eq(reference_id))
            .filter(analysis_history::Column::AnalysisVersion.eq(version))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compares two stored analysis runs.
    ///
    /// Returns `None` when either version does not exist. Endpoints are
    /// ordered chronologically regardless of argument order. Insights are
    /// compared as sets of sentences; metric deltas cover the union of both
    /// runs' metric names.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn compare_analysis_versions(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
        version_a: i32,
        version_b: i32,
    ) -> Result<Option<AnalysisComparison>, AnalysisError> {
        let (low, high) = if version_a <= version_b {
            (version_a, version_b)
        } else {
            (version_b, version_a)
        };

        let Some(before) = self
            .get_analysis_version(organization_id, analysis_type, reference_id, low)
            .await?
        else {
            return Ok(None);
        };
        let Some(after) = self
            .get_analysis_version(organization_id, analysis_type, reference_id, high)
            .await?
        else {
            return Ok(None);
        };

        let insight_evolution =
            compare_insights(&insight_list(&before.ai_insights), &insight_list(&after.ai_insights));
        let deltas = metric_deltas(
            &numeric_metrics(&before.key_metrics),
            &numeric_metrics(&after.key_metrics),
        );

        Ok(Some(AnalysisComparison {
            before,
            after,
            insight_evolution,
            metric_deltas: deltas,
        }))
    }

    // ========================================================================
    // Metric Trends
    // ========================================================================

    /// Analyzes trends of key metrics across recent runs.
    ///
    /// Loads the most recent `periods` runs in chronological order, extracts
    /// each requested metric where present and numeric, and runs trend
    /// analysis per metric. Metrics with fewer than two usable points are
    /// omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn metric_trends(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
        metrics: &[&str],
        periods: u64,
    ) -> Result<Vec<TrendAnalysis>, AnalysisError> {
        let mut rows = analysis_history::Entity::find()
            .filter(analysis_history::Column::OrganizationId.eq(organization_id))
            .filter(analysis_history::Column::AnalysisType.eq(analysis_type))
            .filter(analysis_history::Column::ReferenceId.eq(reference_id))
            .order_by_desc(analysis_history::Column::AnalysisVersion)
            .limit(periods)
            .all(&self.db)
            .await?;
        rows.reverse();

        let mut analyses = Vec::new();
        for metric in metrics {
            let points = analysis_metric_points(&rows, metric);
            if let Some(analysis) = analyze_metric(metric, points) {
                analyses.push(analysis);
            }
        }
        Ok(analyses)
    }

    /// Detects trend shifts in key metrics across recent runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn detect_trend_shifts(
        &self,
        organization_id: Uuid,
        analysis_type: &str,
        reference_id: &str,
        metrics: &[&str],
        periods: u64,
    ) -> Result<Vec<TrendShift>, AnalysisError> {
        let trends = self
            .metric_trends(organization_id, analysis_type, reference_id, metrics, periods)
            .await?;
        Ok(detect_shifts(&trends))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reads a stored `ai_insights` payload as a list of sentences.
///
/// Anything that is not an array of strings reads as empty.
#[must_use]
pub fn insight_list(raw: &JsonValue) -> Vec<String> {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Reads a stored `key_metrics` payload as named numbers.
///
/// Non-numeric values are skipped; anything that is not an object reads as
/// empty.
#[must_use]
pub fn numeric_metrics(raw: &JsonValue) -> BTreeMap<String, f64> {
    raw.as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(name, value)| value.as_f64().map(|number| (name.clone(), number)))
                .collect()
        })
        .unwrap_or_default()
}

/// Extracts the chronological series of one key metric from analysis rows.
#[must_use]
pub fn analysis_metric_points(rows: &[analysis_history::Model], metric: &str) -> Vec<TrendPoint> {
    rows.iter()
        .filter_map(|row| {
            row.key_metrics
                .get(metric)
                .and_then(JsonValue::as_f64)
                .map(|value| TrendPoint::new(row.created_at.with_timezone(&Utc), value))
        })
        .collect()
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
