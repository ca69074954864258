//! Per-field significance thresholds for numeric changes.

use serde_json::Value as JsonValue;

use crate::entity::EntityType;
use crate::metrics::change_fraction;

/// Relative threshold applied to fields without a dedicated config.
pub const DEFAULT_RELATIVE_THRESHOLD: f64 = 0.10;

/// Thresholds deciding when a numeric change counts as significant.
///
/// Either bound suffices on its own: a change is significant when the
/// absolute fraction clears `relative` or the absolute difference clears
/// `absolute`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceConfig {
    /// Minimum |fractional change| to count as significant.
    pub relative: Option<f64>,
    /// Minimum |new - old| to count as significant.
    pub absolute: Option<f64>,
}

impl SignificanceConfig {
    /// Config with only a relative bound.
    #[must_use]
    pub const fn relative(threshold: f64) -> Self {
        Self { relative: Some(threshold), absolute: None }
    }

    /// Config with only an absolute bound.
    #[must_use]
    pub const fn absolute(threshold: f64) -> Self {
        Self { relative: None, absolute: Some(threshold) }
    }
}

/// Significance thresholds for a field, by exact field name.
#[must_use]
pub fn config_for_field(field: &str) -> SignificanceConfig {
    match field {
        "audience_size" => SignificanceConfig::relative(0.10),
        "brand_health" => SignificanceConfig::absolute(5.0),
        "market_share" => SignificanceConfig::relative(0.05),
        "nps" => SignificanceConfig::absolute(10.0),
        "sentiment" => SignificanceConfig::absolute(0.1),
        "awareness" | "consideration" | "preference" => SignificanceConfig::relative(0.05),
        _ => SignificanceConfig::relative(DEFAULT_RELATIVE_THRESHOLD),
    }
}

/// Outcome of a significance check on one modified field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Significance {
    /// Whether the modification clears its thresholds.
    pub is_significant: bool,
    /// Fractional change, present only when both values were numeric.
    pub change_percent: Option<f64>,
}

/// Judge whether a field modification is significant.
///
/// Non-numeric modifications are always significant. Numeric ones are
/// measured against the field's [`SignificanceConfig`].
#[must_use]
pub fn check_significance(
    field: &str,
    old_value: &JsonValue,
    new_value: &JsonValue,
    entity_type: EntityType,
) -> Significance {
    // Thresholds are keyed by field name alone; the entity kind does not
    // participate in the lookup today.
    let _ = entity_type;

    let (Some(previous), Some(current)) = (old_value.as_f64(), new_value.as_f64()) else {
        return Significance { is_significant: true, change_percent: None };
    };

    let fraction = change_fraction(previous, current);
    let config = config_for_field(field);

    let clears_relative = config
        .relative
        .is_some_and(|threshold| fraction.abs() >= threshold);
    let clears_absolute = config
        .absolute
        .is_some_and(|threshold| (current - previous).abs() >= threshold);

    Significance {
        is_significant: clears_relative || clears_absolute,
        change_percent: Some(fraction),
    }
}
