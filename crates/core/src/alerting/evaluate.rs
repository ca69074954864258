//! Threshold evaluation against observed metric changes.

use std::collections::BTreeMap;

use crate::metrics::{change_fraction, humanize_metric};

use super::types::{AlertType, MetricChange, MetricThreshold, ThresholdDirection, TriggeredAlert};

/// Evaluate every threshold against every observed metric change.
///
/// A metric may match several thresholds and each fires independently, so
/// one movement can yield several alerts of different severities. Metrics
/// are visited in key order, which keeps the output deterministic.
#[must_use]
pub fn evaluate_thresholds(
    metrics: &BTreeMap<String, MetricChange>,
    thresholds: &[MetricThreshold],
    entity_name: &str,
) -> Vec<TriggeredAlert> {
    let mut triggered = Vec::new();
    for (metric, change) in metrics {
        for threshold in thresholds.iter().filter(|t| t.metric == *metric) {
            if let Some(alert) = evaluate_one(metric, *change, threshold, entity_name) {
                triggered.push(alert);
            }
        }
    }
    triggered
}

fn evaluate_one(
    metric: &str,
    change: MetricChange,
    threshold: &MetricThreshold,
    entity_name: &str,
) -> Option<TriggeredAlert> {
    let fraction = change_fraction(change.previous, change.current);
    let observed = if threshold.is_percentage {
        fraction.abs()
    } else {
        (change.current - change.previous).abs()
    };

    let satisfied = match threshold.direction {
        ThresholdDirection::Both => observed >= threshold.threshold,
        ThresholdDirection::Increase => fraction > 0.0 && observed >= threshold.threshold,
        ThresholdDirection::Decrease => fraction < 0.0 && observed >= threshold.threshold,
    };
    if !satisfied {
        return None;
    }

    let alert_type = if fraction > 0.0 {
        AlertType::SignificantIncrease
    } else if fraction < 0.0 {
        AlertType::SignificantDecrease
    } else {
        AlertType::ThresholdCrossed
    };
    let (title, message) = render_copy(metric, change, fraction, alert_type, entity_name);

    Some(TriggeredAlert {
        metric: metric.to_string(),
        alert_type,
        severity: threshold.severity,
        title,
        message,
        previous_value: change.previous,
        current_value: change.current,
        change_percent: fraction,
        threshold: threshold.threshold,
    })
}

fn render_copy(
    metric: &str,
    change: MetricChange,
    fraction: f64,
    alert_type: AlertType,
    entity_name: &str,
) -> (String, String) {
    let label = humanize_metric(metric);
    match alert_type {
        AlertType::SignificantIncrease => (
            format!("Significant increase in {label}"),
            format!(
                "{label} for {entity_name} increased from {} to {} ({:+.1}%)",
                change.previous,
                change.current,
                fraction * 100.0
            ),
        ),
        AlertType::SignificantDecrease => (
            format!("Significant decrease in {label}"),
            format!(
                "{label} for {entity_name} decreased from {} to {} ({:+.1}%)",
                change.previous,
                change.current,
                fraction * 100.0
            ),
        ),
        AlertType::ThresholdCrossed | AlertType::NewDataAvailable => (
            format!("{label} threshold crossed"),
            format!(
                "{label} for {entity_name} changed from {} to {}",
                change.previous, change.current
            ),
        ),
    }
}
