//! Postgres enum mappings for the change-tracking tables.
//!
//! Each enum mirrors a domain enum from `vantora-core`; the `From` impls at
//! the bottom convert in both directions so repositories can accept and
//! return core types while SeaORM speaks the database representation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entity_type")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[sea_orm(string_value = "audience")]
    Audience,
    #[sea_orm(string_value = "crosstab")]
    Crosstab,
    #[sea_orm(string_value = "insight")]
    Insight,
    #[sea_orm(string_value = "chart")]
    Chart,
    #[sea_orm(string_value = "report")]
    Report,
    #[sea_orm(string_value = "dashboard")]
    Dashboard,
    #[sea_orm(string_value = "brand_tracking")]
    BrandTracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "change_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    #[sea_orm(string_value = "CREATE")]
    Create,
    #[sea_orm(string_value = "UPDATE")]
    Update,
    #[sea_orm(string_value = "DELETE")]
    Delete,
    #[sea_orm(string_value = "REGENERATE")]
    Regenerate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "alert_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    #[sea_orm(string_value = "SIGNIFICANT_INCREASE")]
    SignificantIncrease,
    #[sea_orm(string_value = "SIGNIFICANT_DECREASE")]
    SignificantDecrease,
    #[sea_orm(string_value = "THRESHOLD_CROSSED")]
    ThresholdCrossed,
    #[sea_orm(string_value = "NEW_DATA_AVAILABLE")]
    NewDataAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "alert_severity")]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    #[sea_orm(string_value = "INFO")]
    Info,
    #[sea_orm(string_value = "WARNING")]
    Warning,
    #[sea_orm(string_value = "CRITICAL")]
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "summary_period")]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

// ============================================================
// Conversions to and from the core domain enums
// ============================================================

impl From<vantora_core::entity::EntityType> for EntityType {
    fn from(value: vantora_core::entity::EntityType) -> Self {
        match value {
            vantora_core::entity::EntityType::Audience => Self::Audience,
            vantora_core::entity::EntityType::Crosstab => Self::Crosstab,
            vantora_core::entity::EntityType::Insight => Self::Insight,
            vantora_core::entity::EntityType::Chart => Self::Chart,
            vantora_core::entity::EntityType::Report => Self::Report,
            vantora_core::entity::EntityType::Dashboard => Self::Dashboard,
            vantora_core::entity::EntityType::BrandTracking => Self::BrandTracking,
        }
    }
}

impl From<EntityType> for vantora_core::entity::EntityType {
    fn from(value: EntityType) -> Self {
        match value {
            EntityType::Audience => Self::Audience,
            EntityType::Crosstab => Self::Crosstab,
            EntityType::Insight => Self::Insight,
            EntityType::Chart => Self::Chart,
            EntityType::Report => Self::Report,
            EntityType::Dashboard => Self::Dashboard,
            EntityType::BrandTracking => Self::BrandTracking,
        }
    }
}

impl From<vantora_core::entity::ChangeType> for ChangeType {
    fn from(value: vantora_core::entity::ChangeType) -> Self {
        match value {
            vantora_core::entity::ChangeType::Create => Self::Create,
            vantora_core::entity::ChangeType::Update => Self::Update,
            vantora_core::entity::ChangeType::Delete => Self::Delete,
            vantora_core::entity::ChangeType::Regenerate => Self::Regenerate,
        }
    }
}

impl From<ChangeType> for vantora_core::entity::ChangeType {
    fn from(value: ChangeType) -> Self {
        match value {
            ChangeType::Create => Self::Create,
            ChangeType::Update => Self::Update,
            ChangeType::Delete => Self::Delete,
            ChangeType::Regenerate => Self::Regenerate,
        }
    }
}

impl From<vantora_core::alerting::AlertType> for AlertType {
    fn from(value: vantora_core::alerting::AlertType) -> Self {
        match value {
            vantora_core::alerting::AlertType::SignificantIncrease => Self::SignificantIncrease,
            vantora_core::alerting::AlertType::SignificantDecrease => Self::SignificantDecrease,
            vantora_core::alerting::AlertType::ThresholdCrossed => Self::ThresholdCrossed,
            vantora_core::alerting::AlertType::NewDataAvailable => Self::NewDataAvailable,
        }
    }
}

impl From<AlertType> for vantora_core::alerting::AlertType {
    fn from(value: AlertType) -> Self {
        match value {
            AlertType::SignificantIncrease => Self::SignificantIncrease,
            AlertType::SignificantDecrease => Self::SignificantDecrease,
            AlertType::ThresholdCrossed => Self::ThresholdCrossed,
            AlertType::NewDataAvailable => Self::NewDataAvailable,
        }
    }
}

impl From<vantora_core::alerting::AlertSeverity> for AlertSeverity {
    fn from(value: vantora_core::alerting::AlertSeverity) -> Self {
        match value {
            vantora_core::alerting::AlertSeverity::Info => Self::Info,
            vantora_core::alerting::AlertSeverity::Warning => Self::Warning,
            vantora_core::alerting::AlertSeverity::Critical => Self::Critical,
        }
    }
}

impl From<AlertSeverity> for vantora_core::alerting::AlertSeverity {
    fn from(value: AlertSeverity) -> Self {
        match value {
            AlertSeverity::Info => Self::Info,
            AlertSeverity::Warning => Self::Warning,
            AlertSeverity::Critical => Self::Critical,
        }
    }
}

impl From<vantora_core::summary::SummaryPeriod> for SummaryPeriod {
    fn from(value: vantora_core::summary::SummaryPeriod) -> Self {
        match value {
            vantora_core::summary::SummaryPeriod::Daily => Self::Daily,
            vantora_core::summary::SummaryPeriod::Weekly => Self::Weekly,
            vantora_core::summary::SummaryPeriod::Monthly => Self::Monthly,
        }
    }
}

impl From<SummaryPeriod> for vantora_core::summary::SummaryPeriod {
    fn from(value: SummaryPeriod) -> Self {
        match value {
            SummaryPeriod::Daily => Self::Daily,
            SummaryPeriod::Weekly => Self::Weekly,
            SummaryPeriod::Monthly => Self::Monthly,
        }
    }
}
