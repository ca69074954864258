//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod alert;
pub mod analysis;
pub mod summary;
pub mod tracker;
pub mod version;

pub use alert::{AlertError, AlertFilter, AlertRepository, CreateAlertInput};
pub use analysis::{
    AnalysisComparison, AnalysisError, AnalysisHistoryRepository, RecordAnalysisInput,
};
pub use summary::{SummaryError, SummaryRepository};
pub use tracker::{TrackerError, TrackerRepository};
pub use version::{
    CaptureChangeInput, HistoryFilter, VersionComparison, VersionError, VersionRepository,
};
