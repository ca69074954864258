//! Digest computation over a window of change records.

use crate::entity::ChangeType;

use super::types::{ChangeRecord, PeriodDigest, TopChange};

/// Fold a window of change records into a digest.
///
/// `top_limit` caps the notable-changes list; significant changes enter it
/// in input order. REGENERATE events count toward the totals and the
/// by-kind breakdown but not toward the created/updated/deleted counts.
#[must_use]
pub fn digest_changes(records: &[ChangeRecord], top_limit: usize) -> PeriodDigest {
    let mut digest = PeriodDigest::default();
    for record in records {
        digest.total_changes += 1;
        *digest
            .by_change_type
            .entry(record.change_type.as_str().to_string())
            .or_insert(0) += 1;
        *digest
            .by_entity_type
            .entry(record.entity_type.as_str().to_string())
            .or_insert(0) += 1;

        match record.change_type {
            ChangeType::Create => digest.new_items += 1,
            ChangeType::Update => digest.updated_items += 1,
            ChangeType::Delete => digest.deleted_items += 1,
            ChangeType::Regenerate => {}
        }

        if record.is_significant {
            digest.significant_changes += 1;
            if digest.top_changes.len() < top_limit {
                digest.top_changes.push(TopChange {
                    entity_type: record.entity_type,
                    entity_id: record.entity_id.clone(),
                    name: record.display_name.clone(),
                    summary: record.summary.clone(),
                });
            }
        }
    }
    digest
}

/// Render the headline strings for a digest.
#[must_use]
pub fn build_highlights(digest: &PeriodDigest, critical_alerts: u64) -> Vec<String> {
    let mut highlights = Vec::new();
    if digest.new_items > 0 {
        highlights.push(format!(
            "{} new item{} created",
            digest.new_items,
            plural(digest.new_items)
        ));
    }
    if digest.significant_changes > 0 {
        highlights.push(format!(
            "{} significant change{}",
            digest.significant_changes,
            plural(digest.significant_changes)
        ));
    }
    if critical_alerts > 0 {
        let suffix = if critical_alerts == 1 { "" } else { "s" };
        highlights.push(format!("{critical_alerts} critical alert{suffix}"));
    }
    highlights
}

fn plural(count: i32) -> &'static str {
    if count == 1 { "" } else { "s" }
}
