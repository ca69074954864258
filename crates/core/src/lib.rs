//! Core change-tracking logic for Vantora.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Snapshot deltas, significance rules, trend analysis,
//! threshold evaluation, insight evolution, and period digests all live
//! here; persistence adapters build on top of it.
//!
//! # Modules
//!
//! - `entity` - Tracked entity vocabulary (entity kinds, change kinds)
//! - `metrics` - Metric naming and change-math helpers
//! - `delta` - Snapshot delta computation and significance rules
//! - `trend` - Trend classification and shift detection
//! - `alerting` - Threshold evaluation and notification copy
//! - `evolution` - Insight-set and key-metric comparison
//! - `summary` - Period digest assembly

pub mod alerting;
pub mod delta;
pub mod entity;
pub mod evolution;
pub mod metrics;
pub mod summary;
pub mod trend;
