//! Unit tests for trend classification and shift detection.

use chrono::{TimeZone, Utc};

use super::analyzer::{analyze_metric, slope_direction};
use super::shift::detect_shifts;
use super::types::{ShiftSignificance, ShiftType, TrendDirection, TrendPoint};

/// Build a daily series starting from a fixed epoch.
fn series(values: &[f64]) -> Vec<TrendPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let offset = i as i64 * 86_400;
            TrendPoint::new(Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap(), *value)
        })
        .collect()
}

#[test]
fn test_rising_series_classifies_as_increasing() {
    let analysis = analyze_metric("nps", series(&[60.0, 70.0, 80.0])).unwrap();

    assert_eq!(analysis.direction, TrendDirection::Increasing);
    assert!((analysis.change_percent - 1.0 / 3.0).abs() < 1e-9);
    assert!((analysis.slope - 10.0).abs() < 1e-9);
    assert_eq!(analysis.points.len(), 3);
}

#[test]
fn test_flat_series_classifies_as_stable() {
    let analysis = analyze_metric("nps", series(&[75.0, 75.0])).unwrap();

    assert_eq!(analysis.direction, TrendDirection::Stable);
    assert!(analysis.change_percent.abs() < 1e-12);
    assert!(analysis.slope.abs() < 1e-12);
    assert!(analysis.volatility.abs() < 1e-12);
    assert!((analysis.trend_strength - 1.0).abs() < 1e-12);
}

#[test]
fn test_falling_series_classifies_as_decreasing() {
    let analysis = analyze_metric("sentiment", series(&[0.8, 0.6, 0.4, 0.2])).unwrap();

    assert_eq!(analysis.direction, TrendDirection::Decreasing);
    assert!(analysis.change_percent < 0.0);
    assert!(analysis.slope < 0.0);
}

#[test]
fn test_noisy_series_classifies_as_volatile() {
    let analysis = analyze_metric("size", series(&[10.0, 100.0, 5.0, 90.0])).unwrap();

    assert_eq!(analysis.direction, TrendDirection::Volatile);
    assert!(analysis.volatility > 0.3);
}

#[test]
fn test_trend_strength_goes_negative_for_extreme_noise() {
    // Mean 7.5, population stddev 12.5: coefficient of variation > 1.
    let analysis = analyze_metric("delta", series(&[-5.0, 20.0])).unwrap();

    assert!(analysis.volatility > 1.0);
    assert!(analysis.trend_strength < 0.0);
}

#[test]
fn test_zero_mean_series_reads_as_not_volatile() {
    let analysis = analyze_metric("net", series(&[-10.0, 10.0])).unwrap();

    assert!(analysis.volatility.abs() < 1e-12);
}

#[test]
fn test_too_few_points_yields_no_analysis() {
    assert!(analyze_metric("nps", series(&[42.0])).is_none());
    assert!(analyze_metric("nps", Vec::new()).is_none());
}

#[test]
fn test_slope_direction_thresholds() {
    assert_eq!(slope_direction(0.0), TrendDirection::Stable);
    assert_eq!(slope_direction(0.019), TrendDirection::Stable);
    assert_eq!(slope_direction(-0.019), TrendDirection::Stable);
    assert_eq!(slope_direction(0.02), TrendDirection::Increasing);
    assert_eq!(slope_direction(-0.02), TrendDirection::Decreasing);
}

#[test]
fn test_reversal_is_detected_with_high_significance() {
    let analysis =
        analyze_metric("nps", series(&[10.0, 20.0, 30.0, 25.0, 15.0, 5.0])).unwrap();

    let shifts = detect_shifts(&[analysis]);

    assert_eq!(shifts.len(), 1);
    let shift = &shifts[0];
    assert_eq!(shift.metric, "nps");
    assert_eq!(shift.shift_type, ShiftType::Reversal);
    assert_eq!(shift.significance, ShiftSignificance::High);
    assert!((shift.magnitude - 20.0).abs() < 1e-9);
    assert!((shift.first_half_slope - 10.0).abs() < 1e-9);
    assert!((shift.second_half_slope + 10.0).abs() < 1e-9);
    // Detected at the first observation of the newer half.
    assert_eq!(shift.detected_at, Utc.timestamp_opt(1_700_000_000 + 3 * 86_400, 0).unwrap());
}

#[test]
fn test_steady_series_produces_no_shift() {
    let analysis = analyze_metric("size", series(&[10.0, 20.0, 30.0, 40.0])).unwrap();

    assert!(detect_shifts(&[analysis]).is_empty());
}

#[test]
fn test_short_series_is_skipped_by_shift_detection() {
    let analysis = analyze_metric("size", series(&[10.0, 20.0, 30.0])).unwrap();

    assert!(detect_shifts(&[analysis]).is_empty());
}

#[test]
fn test_flattening_series_reads_as_deceleration() {
    let analysis =
        analyze_metric("share", series(&[0.0, 10.0, 20.0, 30.0, 30.01, 30.02])).unwrap();

    let shifts = detect_shifts(&[analysis]);

    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].shift_type, ShiftType::Deceleration);
}

#[test]
fn test_awakening_series_reads_as_acceleration() {
    let analysis =
        analyze_metric("share", series(&[10.0, 10.01, 10.02, 20.0, 40.0, 60.0])).unwrap();

    let shifts = detect_shifts(&[analysis]);

    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].shift_type, ShiftType::Acceleration);
    assert_eq!(shifts[0].significance, ShiftSignificance::High);
}

#[test]
fn test_small_slope_disagreement_is_low_significance() {
    let analysis =
        analyze_metric("awareness", series(&[0.0, 0.03, 0.06, 0.06, 0.03, 0.0])).unwrap();

    let shifts = detect_shifts(&[analysis]);

    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].shift_type, ShiftType::Reversal);
    assert_eq!(shifts[0].significance, ShiftSignificance::Low);
}

#[test]
fn test_moderate_slope_disagreement_is_medium_significance() {
    let analysis =
        analyze_metric("preference", series(&[0.0, 0.07, 0.14, 0.14, 0.07, 0.0])).unwrap();

    let shifts = detect_shifts(&[analysis]);

    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].significance, ShiftSignificance::Medium);
}

#[test]
fn test_each_metric_yields_at_most_one_shift() {
    let reversal =
        analyze_metric("nps", series(&[10.0, 20.0, 30.0, 25.0, 15.0, 5.0])).unwrap();
    let steady = analyze_metric("size", series(&[10.0, 20.0, 30.0, 40.0])).unwrap();

    let shifts = detect_shifts(&[reversal, steady]);

    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].metric, "nps");
}
