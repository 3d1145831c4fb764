//! Ingest buffer holding the current batch before dispatch.

use crate::core::types::InputImage;

/// Holds the raw input images selected by the user, before a run takes
/// ownership of them.
///
/// Indices are contiguous and stable for the lifetime of the batch;
/// re-ingestion always renumbers from 0.
#[derive(Debug, Default)]
pub struct IngestBuffer {
    images: Vec<InputImage>,
}

impl IngestBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the batch wholesale, assigning indices in input order.
    pub fn set(&mut self, images: impl IntoIterator<Item = (String, Vec<u8>)>) {
        self.images = images
            .into_iter()
            .enumerate()
            .map(|(index, (filename, bytes))| InputImage::new(filename, bytes, index))
            .collect();
    }

    /// Empties the batch. Already-dispatched jobs are unaffected: they
    /// own their inputs.
    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[InputImage] {
        &self.images
    }

    /// Hands the batch to a run by ownership transfer, leaving the
    /// buffer empty. The orchestrator rejects an empty batch.
    pub fn take(&mut self) -> Vec<InputImage> {
        std::mem::take(&mut self.images)
    }
}
