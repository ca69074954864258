//! Built-in threshold table.

use once_cell::sync::Lazy;

use super::types::{AlertSeverity, MetricThreshold, ThresholdDirection};

static DEFAULT_THRESHOLDS: Lazy<Vec<MetricThreshold>> = Lazy::new(|| {
    vec![
        MetricThreshold {
            metric: "brandHealth".to_string(),
            threshold: 5.0,
            direction: ThresholdDirection::Decrease,
            severity: AlertSeverity::Warning,
            is_percentage: false,
        },
        MetricThreshold {
            metric: "brandHealth".to_string(),
            threshold: 10.0,
            direction: ThresholdDirection::Decrease,
            severity: AlertSeverity::Critical,
            is_percentage: false,
        },
        MetricThreshold {
            metric: "marketShare".to_string(),
            threshold: 0.10,
            direction: ThresholdDirection::Decrease,
            severity: AlertSeverity::Warning,
            is_percentage: true,
        },
        MetricThreshold {
            metric: "audience_size".to_string(),
            threshold: 0.20,
            direction: ThresholdDirection::Both,
            severity: AlertSeverity::Info,
            is_percentage: true,
        },
        MetricThreshold {
            metric: "nps".to_string(),
            threshold: 15.0,
            direction: ThresholdDirection::Decrease,
            severity: AlertSeverity::Critical,
            is_percentage: false,
        },
        MetricThreshold {
            metric: "sentiment".to_string(),
            threshold: 0.2,
            direction: ThresholdDirection::Decrease,
            severity: AlertSeverity::Warning,
            is_percentage: false,
        },
    ]
});

/// The built-in watch rules applied when a caller supplies none.
#[must_use]
pub fn default_thresholds() -> &'static [MetricThreshold] {
    &DEFAULT_THRESHOLDS
}
