//! One-line human-readable summaries for deltas.

use super::types::{FieldChangeType, FieldDelta};

/// Fields surfaced first when they are among the significant changes.
const PRIORITY_FIELDS: [&str; 6] = ["size", "name", "status", "brandHealth", "marketShare", "nps"];

/// Render a one-line summary of a field-change list.
#[must_use]
pub fn render_summary(fields: &[FieldDelta]) -> String {
    if fields.is_empty() {
        return "No changes detected".to_string();
    }

    let significant: Vec<&FieldDelta> = fields.iter().filter(|f| f.is_significant).collect();
    if significant.is_empty() {
        return format!("{} minor change{}", fields.len(), plural(fields.len()));
    }

    let headline = PRIORITY_FIELDS
        .iter()
        .find_map(|priority| significant.iter().find(|f| f.field == *priority))
        .copied();

    match headline {
        Some(field) => describe_field(field),
        None => format!("{} significant change{}", significant.len(), plural(significant.len())),
    }
}

fn describe_field(delta: &FieldDelta) -> String {
    let verb = match delta.change_type {
        FieldChangeType::Added => "added",
        FieldChangeType::Removed => "removed",
        FieldChangeType::Modified => match delta.change_percent {
            Some(pct) if pct > 0.0 => "increased",
            Some(pct) if pct < 0.0 => "decreased",
            _ => "changed",
        },
    };

    match delta.change_percent {
        Some(pct) => format!("{} {} ({:+.1}%)", delta.field, verb, pct * 100.0),
        None => format!("{} {}", delta.field, verb),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
