// ABOUTME: File-based JSON log of assessment reports
// ABOUTME: Maintains a single JSON array file, recovering from missing or corrupt content
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

use super::AssessmentReport;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Log file name within the data directory
const LOG_FILE_NAME: &str = "assessment_log.json";

/// Append-style log of assessment reports backed by one JSON array file
#[derive(Debug, Clone)]
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    /// Create a log at an explicit path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default log location in the platform data directory
    ///
    /// Falls back to `./data` when the platform reports no data directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("data"))
            .join("trailguard")
            .join(LOG_FILE_NAME)
    }

    /// The path this log writes to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a report to the log
    ///
    /// The file holds a JSON array of reports. A missing file starts a new
    /// array; unreadable or corrupt content is discarded and the array
    /// restarted rather than failing the assessment.
    ///
    /// # Errors
    ///
    /// Returns a `STORAGE_ERROR` envelope when the directory or file cannot
    /// be written.
    pub fn append(&self, report: &AssessmentReport) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!(
                    "could not create report log directory {}",
                    parent.display()
                ))
                .with_source(e)
            })?;
        }

        let mut reports = self.read_existing();
        reports.push(serde_json::to_value(report)?);

        let serialized = serde_json::to_string_pretty(&reports)?;
        fs::write(&self.path, serialized).map_err(|e| {
            AppError::storage(format!(
                "could not write report log {}",
                self.path.display()
            ))
            .with_source(e)
        })
    }

    /// Read the existing report array, tolerating absence and corruption
    fn read_existing(&self) -> Vec<serde_json::Value> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Array(reports)) => reports,
            Ok(_) | Err(_) => {
                warn!(
                    path = %self.path.display(),
                    "Report log content is not a JSON array, starting a new log"
                );
                Vec::new()
            }
        }
    }
}
