//! Export of compressed results to a user-chosen destination.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::core::ResultSet;
use crate::utils::CompressorResult;

/// Write capability used by [`ResultSet::export`].
///
/// Lets tests capture writes and keeps the result set out of the
/// filesystem business.
pub trait ExportSink: Send + Sync {
    fn write(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Default sink writing straight to the local filesystem.
#[derive(Debug, Default)]
pub struct FsExportSink;

impl ExportSink for FsExportSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Outcome of one export pass.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExportReport {
    /// Files written to the destination
    pub written: usize,
    /// Results skipped because their job failed
    pub skipped_failures: usize,
    /// Per-file write failures as (filename, error)
    pub failures: Vec<(String, String)>,
}

/// Thin pass-through between the presentation layer and
/// [`ResultSet::export`]: takes the destination the user picked,
/// delegates, surfaces the report. No retries.
pub struct ExportCoordinator<S: ExportSink = FsExportSink> {
    destination: PathBuf,
    sink: S,
}

impl ExportCoordinator<FsExportSink> {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self::with_sink(destination, FsExportSink)
    }
}

impl<S: ExportSink> ExportCoordinator<S> {
    pub fn with_sink(destination: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            destination: destination.into(),
            sink,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn export(&self, results: &ResultSet) -> CompressorResult<ExportReport> {
        let report = results.export_report(&self.destination, &self.sink)?;
        info!(
            "Export to {}: {} written, {} skipped, {} failed",
            self.destination.display(),
            report.written,
            report.skipped_failures,
            report.failures.len()
        );
        Ok(report)
    }
}
