//! Run preconditions, checked before any job is created.

use crate::core::{CompressionSettings, InputImage};
use crate::utils::{CompressorError, CompressorResult};

/// Validates a run trigger: a run refuses to start on an empty batch or
/// out-of-range settings. These are the only failures that surface to
/// the caller as run errors; everything after dispatch is per-job.
pub fn validate_run(batch: &[InputImage], settings: &CompressionSettings) -> CompressorResult<()> {
    if batch.is_empty() {
        return Err(CompressorError::EmptyBatch);
    }
    settings.validate()?;
    Ok(())
}
