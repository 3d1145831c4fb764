//! Core types for compression settings and batch inputs.

use serde::{Deserialize, Serialize};

use crate::utils::{CompressorError, CompressorResult};

/// Compression method selected by the user.
///
/// The serialized tokens are shared with the settings persistence format
/// and the settings UI, and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMethod {
    Lossy,
    Lossless,
    WebpLossy,
    WebpLossless,
}

impl Default for CompressionMethod {
    fn default() -> Self {
        Self::WebpLossy
    }
}

impl CompressionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lossy => "lossy",
            Self::Lossless => "lossless",
            Self::WebpLossy => "webp_lossy",
            Self::WebpLossless => "webp_lossless",
        }
    }

    /// File extension of the compressed output for this method.
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::Lossy => "jpg",
            Self::Lossless => "png",
            Self::WebpLossy | Self::WebpLossless => "webp",
        }
    }

    /// Whether the quality value influences encoding for this method.
    ///
    /// Lossless methods ignore quality, but the value is always carried
    /// so settings round-trip unchanged.
    pub fn is_quality_bearing(&self) -> bool {
        matches!(self, Self::Lossy | Self::WebpLossy)
    }
}

/// User-facing compression settings.
///
/// Quality is an integer in [1, 100]. A run captures a snapshot of these
/// at start; mid-run edits never affect jobs already dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionSettings {
    pub quality: u32,
    pub method: CompressionMethod,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            quality: 75,
            method: CompressionMethod::WebpLossy,
        }
    }
}

impl CompressionSettings {
    pub fn new(quality: u32, method: CompressionMethod) -> Self {
        Self { quality, method }
    }

    /// Validates the quality range.
    pub fn validate(&self) -> CompressorResult<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(CompressorError::invalid_settings(format!(
                "Invalid quality value: {}. Must be between 1 and 100",
                self.quality
            )));
        }
        Ok(())
    }

    /// Returns a copy with quality clamped into [1, 100].
    pub fn clamped(&self) -> Self {
        Self {
            quality: self.quality.clamp(1, 100),
            method: self.method,
        }
    }
}

/// One raw input image selected by the user.
///
/// `index` is the stable position within the batch, used to correlate
/// input and output after asynchronous completion.
#[derive(Debug, Clone)]
pub struct InputImage {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub index: usize,
}

impl InputImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, index: usize) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            index,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Output filename for this input under the given method:
    /// `{stem}_compressed.{ext}` with a method-specific extension.
    pub fn compressed_name(&self, method: CompressionMethod) -> String {
        let stem = std::path::Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        format!("{}_compressed.{}", stem, method.output_extension())
    }
}
