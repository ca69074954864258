//! Snapshot delta computation and significance rules.

pub mod engine;
pub mod error;
pub mod significance;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod engine_props;

pub use engine::{compute_delta, deep_equal, snapshot_fields};
pub use error::DeltaError;
pub use significance::{Significance, SignificanceConfig, check_significance, config_for_field};
pub use summary::render_summary;
pub use types::{EntityDelta, FieldChangeType, FieldDelta};
