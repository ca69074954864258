//! Alert repository for persisting threshold hits and managing alert state.
//!
//! Evaluation itself is pure and lives in `vantora_core::alerting`; this
//! module feeds it metric movements and stores whatever fires.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use vantora_core::alerting::{
    AlertSeverity, AlertType, MetricChange, MetricThreshold, TriggeredAlert, default_thresholds,
    evaluate_thresholds,
};
use vantora_core::entity::EntityType;
use vantora_shared::AppError;
use vantora_shared::types::{PageRequest, PageResponse, TimeWindow};

use crate::entities::{
    change_alerts,
    sea_orm_active_enums::{AlertSeverity as DbAlertSeverity, EntityType as DbEntityType},
};

/// Error types for alert operations.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AlertError> for AppError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for explicitly creating an alert.
#[derive(Debug, Clone)]
pub struct CreateAlertInput {
    /// Organization the alert belongs to.
    pub organization_id: Uuid,
    /// Kind of entity the alert is about.
    pub entity_type: EntityType,
    /// Identifier of the entity.
    pub entity_id: String,
    /// Alert classification.
    pub alert_type: AlertType,
    /// Severity level.
    pub severity: AlertSeverity,
    /// Short headline.
    pub title: String,
    /// Full notification text.
    pub message: String,
    /// Metric involved, when the alert is metric-driven.
    pub metric: Option<String>,
    /// Metric value before the change.
    pub previous_value: Option<f64>,
    /// Metric value after the change.
    pub current_value: Option<f64>,
    /// Fractional change between the values (0.2 = +20%).
    pub change_percent: Option<f64>,
    /// Threshold magnitude that fired, if any.
    pub threshold: Option<f64>,
    /// Free-form extra context.
    pub metadata: Option<JsonValue>,
}

/// Optional filters for alert listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertFilter {
    /// Only alerts that are neither read nor dismissed.
    pub unread_only: bool,
    /// Only alerts of this severity.
    pub severity: Option<AlertSeverity>,
    /// Only alerts about this entity kind.
    pub entity_type: Option<EntityType>,
}

/// Alert repository for alert persistence and lifecycle.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    db: DatabaseConnection,
}

impl AlertRepository {
    /// Creates a new alert repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Threshold Evaluation
    // ========================================================================

    /// Evaluates metric movements against thresholds and stores every hit.
    ///
    /// Falls back to the built-in default threshold table when `thresholds`
    /// is `None`. A metric matched by several thresholds produces one alert
    /// per satisfied threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails.
    pub async fn check_thresholds_and_alert(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        entity_name: &str,
        metrics: &BTreeMap<String, MetricChange>,
        thresholds: Option<&[MetricThreshold]>,
    ) -> Result<Vec<change_alerts::Model>, AlertError> {
        let thresholds = thresholds.unwrap_or_else(default_thresholds);
        let triggered = evaluate_thresholds(metrics, thresholds, entity_name);

        let mut stored = Vec::with_capacity(triggered.len());
        for alert in triggered {
            stored.push(
                self.insert_triggered(organization_id, entity_type, entity_id, alert)
                    .await?,
            );
        }
        Ok(stored)
    }

    /// Stores one triggered alert row.
    async fn insert_triggered(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        alert: TriggeredAlert,
    ) -> Result<change_alerts::Model, AlertError> {
        let row = change_alerts::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            entity_type: Set(entity_type.into()),
            entity_id: Set(entity_id.to_string()),
            alert_type: Set(alert.alert_type.into()),
            severity: Set(alert.severity.into()),
            title: Set(alert.title),
            message: Set(alert.message),
            metric: Set(Some(alert.metric)),
            previous_value: Set(Some(alert.previous_value)),
            current_value: Set(Some(alert.current_value)),
            change_percent: Set(Some(alert.change_percent)),
            threshold: Set(Some(alert.threshold)),
            is_read: Set(false),
            is_dismissed: Set(false),
            metadata: Set(None),
            created_at: Set(Utc::now().into()),
        };
        Ok(row.insert(&self.db).await?)
    }

    // ========================================================================
    // Direct Creation
    // ========================================================================

    /// Creates an alert from explicit input, bypassing threshold evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_alert(
        &self,
        input: CreateAlertInput,
    ) -> Result<change_alerts::Model, AlertError> {
        let row = change_alerts::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            entity_type: Set(input.entity_type.into()),
            entity_id: Set(input.entity_id),
            alert_type: Set(input.alert_type.into()),
            severity: Set(input.severity.into()),
            title: Set(input.title),
            message: Set(input.message),
            metric: Set(input.metric),
            previous_value: Set(input.previous_value),
            current_value: Set(input.current_value),
            change_percent: Set(input.change_percent),
            threshold: Set(input.threshold),
            is_read: Set(false),
            is_dismissed: Set(false),
            metadata: Set(input.metadata),
            created_at: Set(Utc::now().into()),
        };
        Ok(row.insert(&self.db).await?)
    }

    /// Creates an informational "new data available" alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn new_data_alert(
        &self,
        organization_id: Uuid,
        entity_type: EntityType,
        entity_id: &str,
        description: &str,
    ) -> Result<change_alerts::Model, AlertError> {
        self.create_alert(CreateAlertInput {
            organization_id,
            entity_type,
            entity_id: entity_id.to_string(),
            alert_type: AlertType::NewDataAvailable,
            severity: AlertSeverity::Info,
            title: "New data available".to_string(),
            message: description.to_string(),
            metric: None,
            previous_value: None,
            current_value: None,
            change_percent: None,
            threshold: None,
            metadata: None,
        })
        .await
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Marks an alert as read. Idempotent; returns `None` when the alert
    /// does not exist in this organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn mark_as_read(
        &self,
        organization_id: Uuid,
        alert_id: Uuid,
    ) -> Result<Option<change_alerts::Model>, AlertError> {
        let Some(alert) = change_alerts::Entity::find_by_id(alert_id)
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if alert.is_read {
            return Ok(Some(alert));
        }

        let mut active: change_alerts::ActiveModel = alert.into();
        active.is_read = Set(true);
        Ok(Some(active.update(&self.db).await?))
    }

    /// Dismisses an alert. Idempotent; returns `None` when the alert does
    /// not exist in this organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn dismiss(
        &self,
        organization_id: Uuid,
        alert_id: Uuid,
    ) -> Result<Option<change_alerts::Model>, AlertError> {
        let Some(alert) = change_alerts::Entity::find_by_id(alert_id)
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if alert.is_dismissed {
            return Ok(Some(alert));
        }

        let mut active: change_alerts::ActiveModel = alert.into();
        active.is_dismissed = Set(true);
        Ok(Some(active.update(&self.db).await?))
    }

    /// Marks every unread alert of the organization as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn mark_all_as_read(&self, organization_id: Uuid) -> Result<u64, AlertError> {
        let result = change_alerts::Entity::update_many()
            .col_expr(change_alerts::Column::IsRead, Expr::value(true))
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .filter(change_alerts::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Counts alerts that are neither read nor dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unread_count(&self, organization_id: Uuid) -> Result<u64, AlertError> {
        let count = change_alerts::Entity::find()
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .filter(change_alerts::Column::IsRead.eq(false))
            .filter(change_alerts::Column::IsDismissed.eq(false))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// Pages through the organization's alerts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_alerts(
        &self,
        organization_id: Uuid,
        filter: AlertFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<change_alerts::Model>, AlertError> {
        let mut query = change_alerts::Entity::find()
            .filter(change_alerts::Column::OrganizationId.eq(organization_id));

        if filter.unread_only {
            query = query
                .filter(change_alerts::Column::IsRead.eq(false))
                .filter(change_alerts::Column::IsDismissed.eq(false));
        }
        if let Some(severity) = filter.severity {
            query =
                query.filter(change_alerts::Column::Severity.eq(DbAlertSeverity::from(severity)));
        }
        if let Some(entity_type) = filter.entity_type {
            query =
                query.filter(change_alerts::Column::EntityType.eq(DbEntityType::from(entity_type)));
        }

        let total = query.clone().count(&self.db).await?;

        let items = query
            .order_by_desc(change_alerts::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(items, page, total))
    }

    /// Counts alerts created inside a time window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_in_window(
        &self,
        organization_id: Uuid,
        window: &TimeWindow,
    ) -> Result<u64, AlertError> {
        let count = change_alerts::Entity::find()
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .filter(change_alerts::Column::CreatedAt.gte(window.start))
            .filter(change_alerts::Column::CreatedAt.lte(window.end))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// Counts critical alerts created inside a time window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn critical_count_in_window(
        &self,
        organization_id: Uuid,
        window: &TimeWindow,
    ) -> Result<u64, AlertError> {
        let count = change_alerts::Entity::find()
            .filter(change_alerts::Column::OrganizationId.eq(organization_id))
            .filter(change_alerts::Column::Severity.eq(DbAlertSeverity::Critical))
            .filter(change_alerts::Column::CreatedAt.gte(window.start))
            .filter(change_alerts::Column::CreatedAt.lte(window.end))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
