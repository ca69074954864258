//! Insight-set and key-metric comparison between analysis versions.

pub mod compare;

#[cfg(test)]
mod tests;

pub use compare::{InsightEvolution, KeyMetricDelta, compare_insights, metric_deltas};
