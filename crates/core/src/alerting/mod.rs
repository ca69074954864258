//! Threshold evaluation and notification copy.

pub mod defaults;
pub mod evaluate;
pub mod types;

#[cfg(test)]
mod tests;

pub use defaults::default_thresholds;
pub use evaluate::evaluate_thresholds;
pub use types::{
    AlertSeverity, AlertType, MetricChange, MetricThreshold, ThresholdDirection, TriggeredAlert,
};
