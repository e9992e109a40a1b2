pub mod error;
pub mod json;
pub mod memory;

pub use error::{Result, StoreError};
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use lostfound_types::{NewReport, Report, StatusFilter};
use tracing::warn;

/// Persistence for the report collection.
///
/// Implementations hold the whole collection and hand it out in append order.
/// Ids are assigned as `count + 1`, which is only unique while a single
/// process writes to the backing storage.
pub trait ReportStore: Send + Sync {
    /// Reads the full collection in append order.
    fn load(&self) -> Result<Vec<Report>>;

    /// Appends a report, assigning its id, and returns the stored record.
    fn append(&self, report: NewReport) -> Result<Report>;
}

/// Loads the collection, substituting an empty one when the store cannot be
/// read. The failure is logged rather than dropped.
pub fn load_or_empty(store: &dyn ReportStore) -> Vec<Report> {
    match store.load() {
        Ok(reports) => reports,
        Err(e) => {
            warn!("Falling back to an empty report list: {}", e);
            Vec::new()
        }
    }
}

/// Keeps the reports matching `status`, preserving their relative order.
pub fn filter(reports: Vec<Report>, status: StatusFilter) -> Vec<Report> {
    reports
        .into_iter()
        .filter(|report| status.matches(report.kind))
        .collect()
}
