//! Delta computation errors.

use thiserror::Error;

/// Errors raised while preparing snapshots for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    /// Snapshots are compared field-wise, so both must be JSON objects.
    #[error("{context} snapshot is not a JSON object")]
    NotAnObject {
        /// Which snapshot was malformed ("previous" or "current").
        context: &'static str,
    },
}
