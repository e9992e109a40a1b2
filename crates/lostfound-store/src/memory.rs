use std::sync::Mutex;

use lostfound_types::{NewReport, Report};

use crate::ReportStore;
use crate::error::{Result, StoreError};

/// In-process store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    reports: Mutex<Vec<Report>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(reports),
        }
    }
}

impl ReportStore for MemoryStore {
    fn load(&self) -> Result<Vec<Report>> {
        let reports = self.reports.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(reports.clone())
    }

    fn append(&self, report: NewReport) -> Result<Report> {
        let mut reports = self.reports.lock().map_err(|_| StoreError::LockPoisoned)?;
        let stored = report.into_report(reports.len() as u64 + 1);
        reports.push(stored.clone());
        Ok(stored)
    }
}
