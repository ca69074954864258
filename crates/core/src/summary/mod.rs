//! Period digest assembly over a window of change records.

pub mod digest;
pub mod types;


pub use digest::{build_highlights, digest_changes};
pub use types::{ChangeRecord, PeriodDigest, SummaryPeriod, TopChange};
