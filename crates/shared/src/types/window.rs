//! Time window type for range-scoped queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive time window used for summary generation and alert counts.
///
/// Construction normalizes the endpoints so `start <= end` always holds,
/// regardless of argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window from two endpoints, swapping them if reversed.
    #[must_use]
    pub fn new(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Returns true if the timestamp falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_normalizes_reversed_endpoints() {
        let window = TimeWindow::new(ts(200), ts(100));
        assert_eq!(window.start, ts(100));
        assert_eq!(window.end, ts(200));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = TimeWindow::new(ts(100), ts(200));
        assert!(window.contains(ts(100)));
        assert!(window.contains(ts(200)));
        assert!(window.contains(ts(150)));
        assert!(!window.contains(ts(99)));
        assert!(!window.contains(ts(201)));
    }
}
