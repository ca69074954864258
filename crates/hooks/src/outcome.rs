//! Outcome type the hooks hand back to their callers.

use vantora_shared::AppError;

/// Result of one tracking hook invocation.
///
/// Hooks never propagate errors to a caller whose mutation already
/// succeeded; they return this instead. Callers are free to discard it,
/// and tests can assert on the failure without scraping logs.
#[derive(Debug)]
pub enum TrackingOutcome {
    /// Tracking side effects were recorded.
    Recorded {
        /// Version number written, for hooks that capture a snapshot.
        version: Option<i32>,
        /// Alerts raised alongside the capture.
        alerts_raised: usize,
    },

    /// Tracking failed; the caller's primary operation is unaffected.
    Failed(AppError),
}

impl TrackingOutcome {
    /// Whether the hook recorded its side effects.
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }

    /// The recorded version number, when there is one.
    #[must_use]
    pub const fn version(&self) -> Option<i32> {
        match self {
            Self::Recorded { version, .. } => *version,
            Self::Failed(_) => None,
        }
    }

    /// Alerts raised by the hook.
    #[must_use]
    pub const fn alerts_raised(&self) -> usize {
        match self {
            Self::Recorded { alerts_raised, .. } => *alerts_raised,
            Self::Failed(_) => 0,
        }
    }

    /// The failure, when tracking failed.
    #[must_use]
    pub const fn error(&self) -> Option<&AppError> {
        match self {
            Self::Recorded { .. } => None,
            Self::Failed(err) => Some(err),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
