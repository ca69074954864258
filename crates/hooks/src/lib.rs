//! Fire-and-forget tracking hooks for Vantora's CRUD layer.
//!
//! The platform calls these after a primary mutation has already succeeded.
//! Every hook is best-effort: failures are logged and folded into a
//! [`TrackingOutcome`] the caller may discard, and never propagate back into
//! the operation that triggered them.

pub mod hooks;
pub mod outcome;

pub use hooks::{AnalysisOptions, ChangeHooks, WATCHED_METRICS, watched_metric_changes};
pub use outcome::TrackingOutcome;
