use rstest::rstest;
use serde_json::json;

use super::*;

#[test]
fn test_extracts_watched_metrics_present_in_both_snapshots() {
    let previous = json!({"brandHealth": 80.0, "nps": 45, "name": "Acme Cola"});
    let current = json!({"brandHealth": 70.0, "nps": 50, "name": "Acme Cola"});

    let changes = watched_metric_changes(&previous, &current);

    assert_eq!(changes.len(), 2);
    assert_eq!(changes["brandHealth"].previous, 80.0);
    assert_eq!(changes["brandHealth"].current, 70.0);
    assert_eq!(changes["nps"].previous, 45.0);
    assert_eq!(changes["nps"].current, 50.0);
}

#[rstest]
#[case(json!({"size": 100}), json!({}))]
#[case(json!({}), json!({"size": 100}))]
#[case(json!({"size": "100"}), json!({"size": 120}))]
#[case(json!({"size": 100}), json!({"size": null}))]
fn test_skips_metrics_missing_or_non_numeric_on_either_side(
    #[case] previous: JsonValue,
    #[case] current: JsonValue,
) {
    assert!(watched_metric_changes(&previous, &current).is_empty());
}

#[test]
fn test_ignores_unwatched_fields_even_when_numeric() {
    let previous = json!({"revenue": 10.0, "spend": 4.0});
    let current = json!({"revenue": 20.0, "spend": 8.0});

    assert!(watched_metric_changes(&previous, &current).is_empty());
}

#[test]
fn test_unchanged_watched_metrics_are_still_forwarded() {
    let previous = json!({"sentiment": 0.5});
    let current = json!({"sentiment": 0.5});

    let changes = watched_metric_changes(&previous, &current);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes["sentiment"].previous, changes["sentiment"].current);
}
