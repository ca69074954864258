//! Trend analysis types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation of a metric at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// When the observation was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Observed metric value.
    pub value: f64,
}

impl TrendPoint {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(recorded_at: DateTime<Utc>, value: f64) -> Self {
        Self { recorded_at, value }
    }
}

/// Overall direction of a metric series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    Volatile,
}

impl TrendDirection {
    /// Wire/storage form of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
            TrendDirection::Volatile => "volatile",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary statistics for one metric series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Metric the series belongs to.
    pub metric: String,
    /// Classified overall direction.
    pub direction: TrendDirection,
    /// Fractional change from the first observation to the last.
    pub change_percent: f64,
    /// Least-squares slope of value against observation index.
    pub slope: f64,
    /// Coefficient of variation (population stddev over |mean|).
    pub volatility: f64,
    /// `1 - volatility`. May go negative for extremely noisy series.
    pub trend_strength: f64,
    /// The observations themselves, oldest first.
    pub points: Vec<TrendPoint>,
}

/// Kind of detected trend shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    /// Direction flipped between the two halves of the series.
    Reversal,
    /// Movement in the second half is steeper than in the first.
    Acceleration,
    /// Movement in the second half is flatter than in the first.
    Deceleration,
    /// Sudden departure from a flat baseline. The split-slope detector
    /// does not currently emit this variant.
    Breakout,
}

/// How pronounced a detected shift is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftSignificance {
    Low,
    Medium,
    High,
}

/// A change in trend behavior within a single metric series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendShift {
    /// Metric the shift was detected in.
    pub metric: String,
    /// What kind of shift occurred.
    pub shift_type: ShiftType,
    /// Absolute difference between the two half-slopes.
    pub magnitude: f64,
    /// Severity bucket for the magnitude.
    pub significance: ShiftSignificance,
    /// Timestamp of the first observation after the split point.
    pub detected_at: DateTime<Utc>,
    /// Slope of the older half of the series.
    pub first_half_slope: f64,
    /// Slope of the newer half of the series.
    pub second_half_slope: f64,
}
