use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lostfound_types::{NewReport, Report};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ReportStore;
use crate::error::{Result, StoreError};

/// Report store backed by a single JSON document holding an array of reports.
///
/// Every append re-reads the document and rewrites it whole. Appends from
/// this process are serialised by `write_lock`; other processes writing the
/// same file are not coordinated with.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let store = Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        };

        match store.read_all() {
            Ok(reports) => info!(
                "Report store opened at {} ({} reports)",
                path.display(),
                reports.len()
            ),
            Err(e) => warn!("Report store opened at {} but is unreadable: {}", path.display(), e),
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Report>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No backing document at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, reports: &[Report]) -> Result<()> {
        let content = serde_json::to_string_pretty(reports).map_err(StoreError::Serialize)?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reports".into());

        // Write beside the target and rename over it
        let tmp_file = dir.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(|source| StoreError::Io {
            path: tmp_file.clone(),
            source,
        })?;
        fs::rename(&tmp_file, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_file);
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        Ok(())
    }
}

impl ReportStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Report>> {
        self.read_all()
    }

    fn append(&self, report: NewReport) -> Result<Report> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;

        // A corrupt document surfaces here and is left untouched
        let mut reports = self.read_all()?;
        let stored = report.into_report(reports.len() as u64 + 1);
        reports.push(stored.clone());
        self.write_all(&reports)?;

        info!(
            "Report {} ({}, {:?}) saved to {}",
            stored.id,
            stored.kind.as_str(),
            stored.item_name,
            self.path.display()
        );
        Ok(stored)
    }
}
