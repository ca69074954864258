//! Set comparison over AI insights and key metrics.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::metrics::change_fraction;

/// How the AI insight set moved between two analysis versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightEvolution {
    /// Insights present only in the newer version, in its order.
    pub added: Vec<String>,
    /// Insights present only in the older version, in its order.
    pub removed: Vec<String>,
    /// Insights present in both versions, in the newer version's order.
    pub consistent: Vec<String>,
}

/// Per-metric movement between two analysis versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetricDelta {
    /// Metric name.
    pub metric: String,
    /// Value in the older version, when recorded there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
    /// Value in the newer version, when recorded there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    /// Fractional change, present only when both sides are recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

/// Compare the insight lists of two analysis versions.
#[must_use]
pub fn compare_insights(previous: &[String], current: &[String]) -> InsightEvolution {
    let added = current.iter().filter(|i| !previous.contains(i)).cloned().collect();
    let removed = previous.iter().filter(|i| !current.contains(i)).cloned().collect();
    let consistent = current.iter().filter(|i| previous.contains(i)).cloned().collect();
    InsightEvolution { added, removed, consistent }
}

/// Compare the key metrics of two analysis versions over the union of
/// their metric names, in sorted order.
#[must_use]
pub fn metric_deltas(
    previous: &BTreeMap<String, f64>,
    current: &BTreeMap<String, f64>,
) -> Vec<KeyMetricDelta> {
    let names: BTreeSet<&String> = previous.keys().chain(current.keys()).collect();
    names
        .into_iter()
        .map(|name| {
            let old = previous.get(name).copied();
            let new = current.get(name).copied();
            let change_percent = match (old, new) {
                (Some(p), Some(c)) => Some(change_fraction(p, c)),
                _ => None,
            };
            KeyMetricDelta {
                metric: name.clone(),
                previous: old,
                current: new,
                change_percent,
            }
        })
        .collect()
}
