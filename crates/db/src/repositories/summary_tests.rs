//! Tests for the summary repository's row-to-record conversion.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use vantora_core::entity::{ChangeType, EntityType};

use crate::entities::entity_versions;
use crate::entities::sea_orm_active_enums::{
    ChangeType as DbChangeType, EntityType as DbEntityType,
};
use crate::repositories::summary::change_record;

fn version_row(
    change_type: DbChangeType,
    data: serde_json::Value,
    delta: Option<serde_json::Value>,
) -> entity_versions::Model {
    entity_versions::Model {
        id: Uuid::new_v4(),
        organization_id: Uuid::new_v4(),
        entity_type: DbEntityType::Audience,
        entity_id: "aud-1".to_string(),
        version: 2,
        data,
        delta,
        changed_fields: json!([]),
        change_type,
        change_summary: "size increased (+20.0%)".to_string(),
        created_by: None,
        created_at: Utc::now().into(),
    }
}

#[test]
fn test_change_record_prefers_delta_summary_and_significance() {
    let delta = json!({
        "fields": [{
            "field": "size",
            "oldValue": 1000,
            "newValue": 1200,
            "changeType": "modified",
            "isSignificant": true,
            "changePercent": 0.2
        }],
        "changedFieldNames": ["size"],
        "hasSignificantChanges": true,
        "summary": "size increased (+20.0%)"
    });
    let row = version_row(
        DbChangeType::Update,
        json!({"name": "Gen Z Panel", "size": 1200}),
        Some(delta),
    );

    let record = change_record(&row);

    assert_eq!(record.entity_type, EntityType::Audience);
    assert_eq!(record.change_type, ChangeType::Update);
    assert_eq!(record.display_name, "Gen Z Panel");
    assert_eq!(record.summary.as_deref(), Some("size increased (+20.0%)"));
    assert!(record.is_significant);
}

#[test]
fn test_change_record_without_delta_uses_capture_summary() {
    let row = version_row(DbChangeType::Create, json!({"title": "Q3 Report"}), None);

    let record = change_record(&row);

    assert_eq!(record.display_name, "Q3 Report");
    assert_eq!(record.summary.as_deref(), Some("size increased (+20.0%)"));
    assert!(!record.is_significant);
}

#[test]
fn test_change_record_treats_unparseable_delta_as_insignificant() {
    let row = version_row(
        DbChangeType::Update,
        json!({"name": "Tracker"}),
        Some(json!("not a delta object")),
    );

    let record = change_record(&row);

    assert_eq!(record.summary.as_deref(), Some("size increased (+20.0%)"));
    assert!(!record.is_significant);
}

#[test]
fn test_change_record_falls_back_to_entity_id_for_nameless_data() {
    let row = version_row(DbChangeType::Delete, json!({"size": 10}), None);

    let record = change_record(&row);

    assert_eq!(record.display_name, "aud-1");
}
