//! Per-image outcomes and the published result set for a run.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::types::{CompressionMethod, InputImage};
use crate::export::{ExportReport, ExportSink};
use crate::utils::{encode_preview, format_bytes, unique_name, CompressorError, CompressorResult, JobError};

/// Outcome of one compression job, slot-aligned with the input batch.
///
/// Exactly one of `compressed_size` and `error` is present. The raw
/// compressed bytes are kept for export but never serialized to the
/// presentation layer, which gets the base64 previews instead.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionResult {
    pub index: usize,
    pub original_name: String,
    pub compressed_name: String,
    pub original_size: u64,
    pub compressed_size: Option<u64>,
    pub reduction_percent: Option<f32>,
    pub original_preview: String,
    pub compressed_preview: Option<String>,
    pub error: Option<JobError>,
    #[serde(skip)]
    compressed_bytes: Option<Vec<u8>>,
}

impl CompressionResult {
    /// Builds a success record from the input and the engine's output.
    pub fn succeeded(input: &InputImage, method: CompressionMethod, compressed: Vec<u8>) -> Self {
        let original_size = input.size();
        let compressed_size = compressed.len() as u64;
        Self {
            index: input.index,
            original_name: input.filename.clone(),
            compressed_name: input.compressed_name(method),
            original_size,
            compressed_size: Some(compressed_size),
            reduction_percent: Some(reduction_percent(original_size, compressed_size)),
            original_preview: encode_preview(&input.bytes),
            compressed_preview: Some(encode_preview(&compressed)),
            error: None,
            compressed_bytes: Some(compressed),
        }
    }

    /// Builds a failure record; the slot stays filled, the run continues.
    pub fn failed(input: &InputImage, method: CompressionMethod, error: JobError) -> Self {
        Self {
            index: input.index,
            original_name: input.filename.clone(),
            compressed_name: input.compressed_name(method),
            original_size: input.size(),
            compressed_size: None,
            reduction_percent: None,
            original_preview: encode_preview(&input.bytes),
            compressed_preview: None,
            error: Some(error),
            compressed_bytes: None,
        }
    }

    /// Failure record for a job whose worker died before reporting.
    /// The input bytes are gone with the worker, so there is no preview.
    pub(crate) fn aborted(
        index: usize,
        original_name: String,
        compressed_name: String,
        original_size: u64,
        error: JobError,
    ) -> Self {
        Self {
            index,
            original_name,
            compressed_name,
            original_size,
            compressed_size: None,
            reduction_percent: None,
            original_preview: String::new(),
            compressed_preview: None,
            error: Some(error),
            compressed_bytes: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.compressed_size.is_some()
    }

    /// Raw compressed bytes, present iff the job succeeded.
    pub fn compressed_bytes(&self) -> Option<&[u8]> {
        self.compressed_bytes.as_deref()
    }
}

/// Exact size reduction; negative when the compressed file grew, never
/// clamped. Zero-byte originals read as 0 rather than dividing by zero.
fn reduction_percent(original_size: u64, compressed_size: u64) -> f32 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size as f32 - compressed_size as f32) / original_size as f32 * 100.0
}

/// Ordered collection of per-image outcomes for one run.
///
/// Index-aligned with the originating batch, immutable once published,
/// superseded wholesale by the next run.
#[derive(Debug, Serialize)]
pub struct ResultSet {
    entries: Vec<CompressionResult>,
}

impl ResultSet {
    /// Publishes a result set from the run's slot array. Every slot must
    /// be filled and hold its own index.
    pub(crate) fn publish(entries: Vec<CompressionResult>) -> Self {
        debug_assert!(entries.iter().enumerate().all(|(i, r)| r.index == i));
        Self { entries }
    }

    pub fn get(&self, index: usize) -> Option<&CompressionResult> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompressionResult> {
        self.entries.iter()
    }

    pub fn succeeded_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.succeeded_count()
    }

    /// Human-readable summary of the run: success/failure counts and
    /// aggregate bytes saved. Pure function of the stored results.
    pub fn diagnostics(&self) -> String {
        let succeeded = self.succeeded_count();
        let failed = self.failed_count();

        let original_total: u64 = self
            .entries
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.original_size)
            .sum();
        let compressed_total: u64 = self
            .entries
            .iter()
            .filter_map(|r| r.compressed_size)
            .sum();
        let saved = original_total as i64 - compressed_total as i64;

        let mut summary = format!(
            "{}/{} succeeded, {} failed",
            succeeded,
            self.entries.len(),
            failed
        );

        if succeeded > 0 {
            if saved >= 0 {
                summary.push_str(&format!(
                    "; {} -> {} (saved {})",
                    format_bytes(original_total),
                    format_bytes(compressed_total),
                    format_bytes(saved as u64)
                ));
            } else {
                summary.push_str(&format!(
                    "; {} -> {} (grew by {})",
                    format_bytes(original_total),
                    format_bytes(compressed_total),
                    format_bytes((-saved) as u64)
                ));
            }
        }

        for entry in self.entries.iter().filter(|r| !r.is_success()) {
            if let Some(err) = &entry.error {
                summary.push_str(&format!("\n  #{} {}: {}", entry.index, entry.original_name, err));
            }
        }

        summary
    }

    /// Writes each successful result's compressed bytes to
    /// `destination/compressed_name`, flat. Failed results are skipped.
    /// Returns the number of files written.
    ///
    /// Export is best-effort, not transactional: per-file write errors
    /// are logged and skipped, files already written stay on disk.
    pub fn export(&self, destination: &Path, sink: &dyn ExportSink) -> CompressorResult<usize> {
        self.export_report(destination, sink).map(|report| report.written)
    }

    /// Export with per-file failure detail for the presentation layer.
    pub fn export_report(&self, destination: &Path, sink: &dyn ExportSink) -> CompressorResult<ExportReport> {
        if !destination.is_dir() {
            return Err(CompressorError::export(format!(
                "Destination is not a writable directory: {}",
                destination.display()
            )));
        }

        let mut report = ExportReport::default();
        let mut taken: HashSet<String> = HashSet::new();

        for entry in &self.entries {
            let Some(bytes) = entry.compressed_bytes() else {
                report.skipped_failures += 1;
                continue;
            };

            // Two inputs can share a stem; suffix instead of overwriting.
            let name = unique_name(&entry.compressed_name, &taken);
            taken.insert(name.clone());

            let path = destination.join(&name);
            match sink.write(&path, bytes) {
                Ok(()) => {
                    debug!("Exported {} ({} bytes)", path.display(), bytes.len());
                    report.written += 1;
                }
                Err(e) => {
                    warn!("Failed to export {}: {}", path.display(), e);
                    report.failures.push((name, e.to_string()));
                }
            }
        }

        Ok(report)
    }
}
