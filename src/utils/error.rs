//! Error types for the compression core.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use serde::Serialize;
use thiserror::Error;

/// Classification of a per-image job failure.
///
/// These never abort a run: a failed job is recorded in its result slot
/// and the batch continues to the next index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobErrorKind {
    /// The engine does not understand the input bytes
    UnsupportedFormat,
    /// The engine failed while encoding
    EncodeError,
    /// IO failure while the engine was reading or buffering
    IoError,
    /// The job was dropped before dispatch by `cancel()`
    Cancelled,
}

/// A per-image failure, recorded verbatim in the result slot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind:?}: {message}")]
pub struct JobError {
    pub kind: JobErrorKind,
    pub message: String,
}

impl JobError {
    pub fn new(kind: JobErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn cancelled() -> Self {
        Self::new(JobErrorKind::Cancelled, "job cancelled before dispatch")
    }
}

/// Main error type for the compression core.
///
/// These are run-wide failures: a run refuses to start (bad settings,
/// empty batch, unreachable engine) or an export cannot begin. Per-image
/// failures are [`JobError`]s and live inside the result set instead.
#[derive(Error, Debug, Serialize)]
pub enum CompressorError {
    /// Settings failed validation before dispatch
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A run was triggered with no images in the batch
    #[error("Empty batch: no images to compress")]
    EmptyBatch,

    /// The compression engine capability is unreachable
    #[error("Compression engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The export destination cannot be written
    #[error("Export error: {0}")]
    Export(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

// Helper methods for error creation
impl CompressorError {
    pub fn invalid_settings<T: Into<String>>(msg: T) -> Self {
        Self::InvalidSettings(msg.into())
    }

    pub fn engine_unavailable<T: Into<String>>(msg: T) -> Self {
        Self::EngineUnavailable(msg.into())
    }

    pub fn export<T: Into<String>>(msg: T) -> Self {
        Self::Export(msg.into())
    }
}

// Convert std::io::Error to CompressorError
impl From<io::Error> for CompressorError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
