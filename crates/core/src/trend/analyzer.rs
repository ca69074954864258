//! Metric trend classification.

use crate::metrics::change_fraction;

use super::stats::{linear_slope, mean, std_deviation};
use super::types::{TrendAnalysis, TrendDirection, TrendPoint};

/// Slopes below this magnitude count as flat.
pub const STABLE_SLOPE_THRESHOLD: f64 = 0.02;

/// Coefficient-of-variation ceiling before a series reads as noise.
pub const VOLATILITY_THRESHOLD: f64 = 0.3;

/// Classify a metric series. `None` for fewer than two points.
///
/// Points are expected oldest first; the analysis keeps them for later
/// shift detection.
#[must_use]
pub fn analyze_metric(metric: &str, points: Vec<TrendPoint>) -> Option<TrendAnalysis> {
    if points.len() < 2 {
        return None;
    }

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let first = values[0];
    let last = values[values.len() - 1];

    let change_percent = change_fraction(first, last);
    let slope = linear_slope(&values);
    let avg = mean(&values);
    let volatility = if avg == 0.0 { 0.0 } else { std_deviation(&values) / avg.abs() };

    let direction = if volatility > VOLATILITY_THRESHOLD {
        TrendDirection::Volatile
    } else {
        slope_direction(slope)
    };

    Some(TrendAnalysis {
        metric: metric.to_string(),
        direction,
        change_percent,
        slope,
        volatility,
        trend_strength: 1.0 - volatility,
        points,
    })
}

/// Direction from slope alone, ignoring volatility.
#[must_use]
pub fn slope_direction(slope: f64) -> TrendDirection {
    if slope.abs() < STABLE_SLOPE_THRESHOLD {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}
