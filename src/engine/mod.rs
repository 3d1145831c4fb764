//! The compression engine capability consumed by the orchestrator.
//!
//! The actual pixel-level codec lives behind this boundary; the core
//! only dispatches to it and classifies its failures.

use thiserror::Error;

use crate::core::CompressionSettings;
use crate::utils::{JobError, JobErrorKind};

/// Failure modes of a single `compress` call.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// The input bytes are not an image format the engine handles
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    /// Encoding failed partway through
    #[error("Encode error: {0}")]
    Encode(String),
    /// IO failure while the engine was reading or buffering
    #[error("IO error: {0}")]
    Io(String),
}

impl EngineError {
    /// Maps an engine failure to the per-job error recorded in the
    /// result slot.
    pub fn into_job_error(self) -> JobError {
        let kind = match &self {
            Self::UnsupportedFormat(_) => JobErrorKind::UnsupportedFormat,
            Self::Encode(_) => JobErrorKind::EncodeError,
            Self::Io(_) => JobErrorKind::IoError,
        };
        JobError::new(kind, self.to_string())
    }
}

/// Capability that turns one input image into compressed bytes.
///
/// `compress` is treated as a slow, CPU-bound call: the orchestrator
/// runs it on a blocking thread and never holds locks across it.
/// Implementations must be safe to call from several workers at once.
pub trait CompressionEngine: Send + Sync {
    fn compress(&self, image: &[u8], settings: &CompressionSettings) -> Result<Vec<u8>, EngineError>;

    /// Readiness check performed once before any job is dispatched.
    /// A failure here aborts the whole run before it starts.
    fn probe(&self) -> Result<(), EngineError> {
        Ok(())
    }
}
