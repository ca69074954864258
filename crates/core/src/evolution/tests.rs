//! Unit tests for insight-set and key-metric comparison.

use std::collections::BTreeMap;

use super::compare::{compare_insights, metric_deltas};

fn insights(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn metrics(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(name, value)| ((*name).to_string(), *value)).collect()
}

#[test]
fn test_partitions_insights_into_added_removed_consistent() {
    let previous = insights(&["A", "B", "C"]);
    let current = insights(&["B", "D", "E"]);

    let evolution = compare_insights(&previous, &current);

    assert_eq!(evolution.added, insights(&["D", "E"]));
    assert_eq!(evolution.removed, insights(&["A", "C"]));
    assert_eq!(evolution.consistent, insights(&["B"]));
}

#[test]
fn test_first_analysis_reads_as_all_added() {
    let evolution = compare_insights(&[], &insights(&["A", "B"]));

    assert_eq!(evolution.added, insights(&["A", "B"]));
    assert!(evolution.removed.is_empty());
    assert!(evolution.consistent.is_empty());
}

#[test]
fn test_identical_insight_sets_are_fully_consistent() {
    let both = insights(&["A", "B"]);

    let evolution = compare_insights(&both, &both);

    assert!(evolution.added.is_empty());
    assert!(evolution.removed.is_empty());
    assert_eq!(evolution.consistent, both);
}

#[test]
fn test_consistent_follows_current_order() {
    let previous = insights(&["A", "B", "C"]);
    let current = insights(&["C", "A"]);

    let evolution = compare_insights(&previous, &current);

    assert_eq!(evolution.consistent, insights(&["C", "A"]));
    assert_eq!(evolution.removed, insights(&["B"]));
}

#[test]
fn test_metric_deltas_cover_the_union_sorted() {
    let previous = metrics(&[("nps", 50.0), ("size", 100.0)]);
    let current = metrics(&[("nps", 60.0), ("share", 0.2)]);

    let deltas = metric_deltas(&previous, &current);

    let names: Vec<&str> = deltas.iter().map(|d| d.metric.as_str()).collect();
    assert_eq!(names, ["nps", "share", "size"]);

    let nps = &deltas[0];
    assert_eq!(nps.previous, Some(50.0));
    assert_eq!(nps.current, Some(60.0));
    assert!((nps.change_percent.unwrap() - 0.2).abs() < 1e-12);

    let share = &deltas[1];
    assert_eq!(share.previous, None);
    assert_eq!(share.current, Some(0.2));
    assert_eq!(share.change_percent, None);

    let size = &deltas[2];
    assert_eq!(size.previous, Some(100.0));
    assert_eq!(size.current, None);
    assert_eq!(size.change_percent, None);
}

#[test]
fn test_metric_delta_zero_base_is_full_move() {
    let previous = metrics(&[("nps", 0.0)]);
    let current = metrics(&[("nps", 30.0)]);

    let deltas = metric_deltas(&previous, &current);

    assert!((deltas[0].change_percent.unwrap() - 1.0).abs() < 1e-12);
}
