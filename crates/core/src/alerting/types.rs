//! Threshold and alert types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which direction of movement a threshold watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdDirection {
    Increase,
    Decrease,
    Both,
}

/// Alert severity levels, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Wire/storage form of the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Info => "INFO",
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What prompted an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    SignificantIncrease,
    SignificantDecrease,
    ThresholdCrossed,
    NewDataAvailable,
}

impl AlertType {
    /// Wire/storage form of the alert kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertType::SignificantIncrease => "SIGNIFICANT_INCREASE",
            AlertType::SignificantDecrease => "SIGNIFICANT_DECREASE",
            AlertType::ThresholdCrossed => "THRESHOLD_CROSSED",
            AlertType::NewDataAvailable => "NEW_DATA_AVAILABLE",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured watch rule for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricThreshold {
    /// Metric key the rule watches.
    pub metric: String,
    /// Magnitude the observed change must reach.
    pub threshold: f64,
    /// Direction of movement the rule cares about.
    pub direction: ThresholdDirection,
    /// Severity of the alert raised when the rule fires.
    pub severity: AlertSeverity,
    /// Compare the fractional change when true, the absolute difference
    /// when false.
    pub is_percentage: bool,
}

/// Before/after observation of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChange {
    /// Value before the change.
    pub previous: f64,
    /// Value after the change.
    pub current: f64,
}

impl MetricChange {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(previous: f64, current: f64) -> Self {
        Self { previous, current }
    }
}

/// A threshold that fired, with rendered notification copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredAlert {
    /// Metric that moved.
    pub metric: String,
    /// Direction-derived alert kind.
    pub alert_type: AlertType,
    /// Severity taken from the threshold that fired.
    pub severity: AlertSeverity,
    /// Short headline for the alert.
    pub title: String,
    /// Full notification sentence.
    pub message: String,
    /// Metric value before the change.
    pub previous_value: f64,
    /// Metric value after the change.
    pub current_value: f64,
    /// Fractional change between the two values.
    pub change_percent: f64,
    /// Threshold magnitude that was cleared.
    pub threshold: f64,
}
