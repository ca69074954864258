//! Unit tests for threshold evaluation.

use std::collections::BTreeMap;

use super::defaults::default_thresholds;
use super::evaluate::evaluate_thresholds;
use super::types::{AlertSeverity, AlertType, MetricChange, MetricThreshold, ThresholdDirection};

fn changes(entries: &[(&str, f64, f64)]) -> BTreeMap<String, MetricChange> {
    entries
        .iter()
        .map(|(metric, previous, current)| {
            ((*metric).to_string(), MetricChange::new(*previous, *current))
        })
        .collect()
}

#[test]
fn test_brand_health_drop_fires_warning_and_critical() {
    let metrics = changes(&[("brandHealth", 80.0, 70.0)]);

    let alerts = evaluate_thresholds(&metrics, default_thresholds(), "Acme Cola");

    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a.alert_type == AlertType::SignificantDecrease));
    let severities: Vec<AlertSeverity> = alerts.iter().map(|a| a.severity).collect();
    assert!(severities.contains(&AlertSeverity::Warning));
    assert!(severities.contains(&AlertSeverity::Critical));

    let warning = alerts.iter().find(|a| a.severity == AlertSeverity::Warning).unwrap();
    assert_eq!(warning.title, "Significant decrease in Brand Health");
    assert_eq!(
        warning.message,
        "Brand Health for Acme Cola decreased from 80 to 70 (-12.5%)"
    );
    assert!((warning.change_percent + 0.125).abs() < 1e-12);
    assert!((warning.previous_value - 80.0).abs() < 1e-12);
    assert!((warning.current_value - 70.0).abs() < 1e-12);
}

#[test]
fn test_small_brand_health_drop_fires_nothing() {
    let metrics = changes(&[("brandHealth", 80.0, 78.0)]);

    let alerts = evaluate_thresholds(&metrics, default_thresholds(), "Acme Cola");

    assert!(alerts.is_empty());
}

#[test]
fn test_brand_health_increase_fires_nothing_by_default() {
    // Both default brandHealth rules watch decreases only.
    let metrics = changes(&[("brandHealth", 70.0, 90.0)]);

    let alerts = evaluate_thresholds(&metrics, default_thresholds(), "Acme Cola");

    assert!(alerts.is_empty());
}

#[test]
fn test_market_share_uses_percentage_comparison() {
    // -16.7% clears the 10% percentage rule even though the absolute
    // difference is only 0.05.
    let metrics = changes(&[("marketShare", 0.30, 0.25)]);

    let alerts = evaluate_thresholds(&metrics, default_thresholds(), "Acme Cola");

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert_eq!(alerts[0].alert_type, AlertType::SignificantDecrease);
}

#[test]
fn test_audience_size_watches_both_directions() {
    let grew = changes(&[("audience_size", 1000.0, 1250.0)]);
    let shrank = changes(&[("audience_size", 1000.0, 790.0)]);

    let grow_alerts = evaluate_thresholds(&grew, default_thresholds(), "Gen Z");
    let shrink_alerts = evaluate_thresholds(&shrank, default_thresholds(), "Gen Z");

    assert_eq!(grow_alerts.len(), 1);
    assert_eq!(grow_alerts[0].alert_type, AlertType::SignificantIncrease);
    assert_eq!(grow_alerts[0].severity, AlertSeverity::Info);
    assert_eq!(grow_alerts[0].title, "Significant increase in Audience Size");

    assert_eq!(shrink_alerts.len(), 1);
    assert_eq!(shrink_alerts[0].alert_type, AlertType::SignificantDecrease);
}

#[test]
fn test_zero_base_reads_as_full_move() {
    let thresholds = vec![MetricThreshold {
        metric: "nps".to_string(),
        threshold: 0.5,
        direction: ThresholdDirection::Both,
        severity: AlertSeverity::Info,
        is_percentage: true,
    }];
    let metrics = changes(&[("nps", 0.0, 5.0)]);

    let alerts = evaluate_thresholds(&metrics, &thresholds, "Acme Cola");

    assert_eq!(alerts.len(), 1);
    assert!((alerts[0].change_percent - 1.0).abs() < 1e-12);
    assert_eq!(alerts[0].alert_type, AlertType::SignificantIncrease);
}

#[test]
fn test_increase_rule_ignores_decreases() {
    let thresholds = vec![MetricThreshold {
        metric: "awareness".to_string(),
        threshold: 0.05,
        direction: ThresholdDirection::Increase,
        severity: AlertSeverity::Info,
        is_percentage: false,
    }];
    let metrics = changes(&[("awareness", 0.50, 0.30)]);

    let alerts = evaluate_thresholds(&metrics, &thresholds, "Acme Cola");

    assert!(alerts.is_empty());
}

#[test]
fn test_unwatched_metrics_fire_nothing() {
    let metrics = changes(&[("followers", 100.0, 5000.0)]);

    let alerts = evaluate_thresholds(&metrics, default_thresholds(), "Acme Cola");

    assert!(alerts.is_empty());
}

#[test]
fn test_flat_change_with_zero_threshold_reads_as_crossed() {
    let thresholds = vec![MetricThreshold {
        metric: "nps".to_string(),
        threshold: 0.0,
        direction: ThresholdDirection::Both,
        severity: AlertSeverity::Info,
        is_percentage: false,
    }];
    let metrics = changes(&[("nps", 40.0, 40.0)]);

    let alerts = evaluate_thresholds(&metrics, &thresholds, "Acme Cola");

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, AlertType::ThresholdCrossed);
    assert_eq!(alerts[0].title, "Nps threshold crossed");
}

#[test]
fn test_alerts_come_out_in_metric_key_order() {
    let metrics = changes(&[
        ("sentiment", 0.8, 0.4),
        ("brandHealth", 80.0, 60.0),
        ("marketShare", 0.40, 0.20),
    ]);

    let alerts = evaluate_thresholds(&metrics, default_thresholds(), "Acme Cola");

    let order: Vec<&str> = alerts.iter().map(|a| a.metric.as_str()).collect();
    assert_eq!(order, ["brandHealth", "brandHealth", "marketShare", "sentiment"]);
}

#[test]
fn test_default_table_shape() {
    let table = default_thresholds();

    assert_eq!(table.len(), 6);
    assert_eq!(table.iter().filter(|t| t.metric == "brandHealth").count(), 2);
    assert!(table.iter().any(|t| t.metric == "audience_size"
        && t.direction == ThresholdDirection::Both
        && t.is_percentage));
    assert!(table.iter().any(|t| t.metric == "nps"
        && t.severity == AlertSeverity::Critical
        && !t.is_percentage));
}
