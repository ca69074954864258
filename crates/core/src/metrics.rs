//! Metric naming and change-math helpers shared across the pipeline.

use serde_json::Value as JsonValue;

/// Fractional change from `previous` to `current`.
///
/// A zero baseline has no meaningful ratio: `0 -> 0` reads as no change and
/// `0 -> x` reads as a full 100% move.
#[must_use]
pub fn change_fraction(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 { 0.0 } else { 1.0 }
    } else {
        (current - previous) / previous.abs()
    }
}

/// Human-readable label for a metric key in either snake_case or camelCase.
///
/// `brandHealth` and `brand_health` both become `Brand Health`.
#[must_use]
pub fn humanize_metric(metric: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    for ch in metric.chars() {
        if ch == '_' {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
        } else if ch.is_ascii_uppercase() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            word.push(ch.to_ascii_lowercase());
        } else {
            word.push(ch);
        }
    }
    if !word.is_empty() {
        words.push(word);
    }

    let mut label = String::new();
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            label.push(' ');
        }
        let mut chars = w.chars();
        if let Some(first) = chars.next() {
            label.push(first.to_ascii_uppercase());
            label.push_str(chars.as_str());
        }
    }
    label
}

/// Display name for an entity snapshot: `name`, then `title`, then the id.
#[must_use]
pub fn display_name(data: &JsonValue, entity_id: &str) -> String {
    data.get("name")
        .and_then(JsonValue::as_str)
        .or_else(|| data.get("title").and_then(JsonValue::as_str))
        .unwrap_or(entity_id)
        .to_string()
}

/// Numeric value of `field` in a snapshot, if present and a number.
#[must_use]
pub fn numeric_field(data: &JsonValue, field: &str) -> Option<f64> {
    data.get(field).and_then(JsonValue::as_f64)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(0.0, 0.0, 0.0)]
    #[case(0.0, 5.0, 1.0)]
    #[case(100.0, 120.0, 0.2)]
    #[case(100.0, 80.0, -0.2)]
    #[case(-50.0, -25.0, 0.5)]
    #[case(1000.0, 1050.0, 0.05)]
    fn test_change_fraction_cases(
        #[case] previous: f64,
        #[case] current: f64,
        #[case] expected: f64,
    ) {
        let fraction = change_fraction(previous, current);
        assert!(
            (fraction - expected).abs() < 1e-12,
            "change_fraction({previous}, {current}) = {fraction}, expected {expected}"
        );
    }

    #[rstest]
    #[case("brandHealth", "Brand Health")]
    #[case("brand_health", "Brand Health")]
    #[case("audience_size", "Audience Size")]
    #[case("marketShare", "Market Share")]
    #[case("nps", "Nps")]
    #[case("size", "Size")]
    #[case("", "")]
    fn test_humanize_metric_cases(#[case] metric: &str, #[case] expected: &str) {
        assert_eq!(humanize_metric(metric), expected);
    }

    #[test]
    fn test_display_name_prefers_name_then_title() {
        let both = json!({"name": "Gen Z Cohort", "title": "Fallback"});
        assert_eq!(display_name(&both, "aud-1"), "Gen Z Cohort");

        let title_only = json!({"title": "Q3 Brand Report"});
        assert_eq!(display_name(&title_only, "rep-1"), "Q3 Brand Report");

        let neither = json!({"size": 100});
        assert_eq!(display_name(&neither, "aud-2"), "aud-2");

        let non_string_name = json!({"name": 42});
        assert_eq!(display_name(&non_string_name, "aud-3"), "aud-3");
    }

    #[test]
    fn test_numeric_field_only_accepts_numbers() {
        let data = json!({"size": 1500, "share": 0.25, "name": "A", "active": true});
        assert_eq!(numeric_field(&data, "size"), Some(1500.0));
        assert_eq!(numeric_field(&data, "share"), Some(0.25));
        assert_eq!(numeric_field(&data, "name"), None);
        assert_eq!(numeric_field(&data, "active"), None);
        assert_eq!(numeric_field(&data, "missing"), None);
    }
}
