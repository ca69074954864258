//! Property-based tests for the statistics helpers.

use proptest::prelude::*;

use super::stats::{linear_slope, mean, std_deviation};

/// Strategy to generate a bounded metric series.
fn values(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1.0e6..1.0e6f64, min_len..24)
}

proptest! {
    /// A constant series has zero slope and zero deviation.
    #[test]
    fn prop_constant_series_is_flat(value in -1.0e6..1.0e6f64, len in 2usize..24) {
        let series = vec![value; len];
        prop_assert!(linear_slope(&series).abs() < 1e-6);
        prop_assert!(std_deviation(&series).abs() < 1e-6);
    }

    /// The fit recovers the slope of a perfectly linear series.
    #[test]
    fn prop_linear_series_recovers_slope(
        intercept in -1.0e3..1.0e3f64,
        slope in -1.0e3..1.0e3f64,
        len in 2usize..24,
    ) {
        let series: Vec<f64> = (0..len).map(|i| intercept + slope * i as f64).collect();
        prop_assert!((linear_slope(&series) - slope).abs() < 1e-6);
    }

    /// The mean always sits within the series' bounds.
    #[test]
    fn prop_mean_is_bounded(series in values(1)) {
        let avg = mean(&series);
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9);
    }

    /// Standard deviation is never negative.
    #[test]
    fn prop_deviation_is_non_negative(series in values(0)) {
        prop_assert!(std_deviation(&series) >= 0.0);
    }

    /// Reading a series backwards negates its slope.
    #[test]
    fn prop_reversed_series_negates_slope(series in values(2)) {
        let forward = linear_slope(&series);
        let mut reversed = series.clone();
        reversed.reverse();
        let backward = linear_slope(&reversed);
        let tolerance = 1e-6 * (1.0 + forward.abs());
        prop_assert!((forward + backward).abs() < tolerance);
    }

    /// Shifting every value by a constant leaves the slope untouched.
    #[test]
    fn prop_slope_is_translation_invariant(series in values(2), shift in -1.0e3..1.0e3f64) {
        let original = linear_slope(&series);
        let shifted: Vec<f64> = series.iter().map(|v| v + shift).collect();
        let tolerance = 1e-6 * (1.0 + original.abs());
        prop_assert!((original - linear_slope(&shifted)).abs() < tolerance);
    }
}
