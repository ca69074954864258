//! Trend classification and shift detection over metric series.

pub mod analyzer;
pub mod shift;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod stats_props;

pub use analyzer::{STABLE_SLOPE_THRESHOLD, VOLATILITY_THRESHOLD, analyze_metric, slope_direction};
pub use shift::{MIN_SHIFT_POINTS, detect_shifts};
pub use types::{
    ShiftSignificance, ShiftType, TrendAnalysis, TrendDirection, TrendPoint, TrendShift,
};
