//! Split-slope shift detection.

use super::analyzer::slope_direction;
use super::stats::linear_slope;
use super::types::{ShiftSignificance, ShiftType, TrendAnalysis, TrendDirection, TrendShift};

/// Minimum observations before a series can be split and compared.
pub const MIN_SHIFT_POINTS: usize = 4;

/// Slope-difference floor for a high-significance shift.
const HIGH_MAGNITUDE: f64 = 0.2;

/// Slope-difference floor for a medium-significance shift.
const MEDIUM_MAGNITUDE: f64 = 0.1;

/// Detect trend shifts across a set of analyzed metric series.
///
/// Each series is split in half and the halves' slopes compared; a shift
/// is reported when their directions disagree. At most one shift per
/// metric.
#[must_use]
pub fn detect_shifts(trends: &[TrendAnalysis]) -> Vec<TrendShift> {
    trends.iter().filter_map(shift_for_trend).collect()
}

fn shift_for_trend(trend: &TrendAnalysis) -> Option<TrendShift> {
    if trend.points.len() < MIN_SHIFT_POINTS {
        return None;
    }

    let mid = trend.points.len() / 2;
    let (older, newer) = trend.points.split_at(mid);
    let older_values: Vec<f64> = older.iter().map(|p| p.value).collect();
    let newer_values: Vec<f64> = newer.iter().map(|p| p.value).collect();

    let first_half_slope = linear_slope(&older_values);
    let second_half_slope = linear_slope(&newer_values);
    let first_direction = slope_direction(first_half_slope);
    let second_direction = slope_direction(second_half_slope);

    if first_direction == second_direction {
        return None;
    }

    let magnitude = (second_half_slope - first_half_slope).abs();
    let significance = if magnitude > HIGH_MAGNITUDE {
        ShiftSignificance::High
    } else if magnitude > MEDIUM_MAGNITUDE {
        ShiftSignificance::Medium
    } else {
        ShiftSignificance::Low
    };

    Some(TrendShift {
        metric: trend.metric.clone(),
        shift_type: classify_shift(
            first_direction,
            second_direction,
            first_half_slope,
            second_half_slope,
        ),
        magnitude,
        significance,
        detected_at: trend.points[mid].recorded_at,
        first_half_slope,
        second_half_slope,
    })
}

fn classify_shift(
    first: TrendDirection,
    second: TrendDirection,
    first_slope: f64,
    second_slope: f64,
) -> ShiftType {
    let reversal = matches!(
        (first, second),
        (TrendDirection::Increasing, TrendDirection::Decreasing)
            | (TrendDirection::Decreasing, TrendDirection::Increasing)
    );
    if reversal {
        ShiftType::Reversal
    } else if second_slope.abs() > first_slope.abs() {
        ShiftType::Acceleration
    } else {
        ShiftType::Deceleration
    }
}
