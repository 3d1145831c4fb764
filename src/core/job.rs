//! Compression job definition and lifecycle.

use crate::core::types::{CompressionSettings, InputImage};

/// Lifecycle state of a single compression job.
///
/// Transitions are monotonic: `Pending → Running → Succeeded | Failed`.
/// A job never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// One unit of compression work for a single input image.
///
/// The job owns its own settings snapshot, so mid-run settings edits
/// never affect jobs already dispatched.
#[derive(Debug)]
pub struct CompressionJob {
    pub input: InputImage,
    pub settings: CompressionSettings,
    state: JobState,
}

impl CompressionJob {
    pub fn new(input: InputImage, settings: CompressionSettings) -> Self {
        Self {
            input,
            settings,
            state: JobState::Pending,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.input.index
    }

    /// Marks the job as dispatched to a worker.
    pub fn start(&mut self) {
        debug_assert_eq!(self.state, JobState::Pending, "job started twice");
        self.state = JobState::Running;
    }

    /// Marks a running job as succeeded.
    pub fn succeed(&mut self) {
        debug_assert_eq!(self.state, JobState::Running, "job succeeded without running");
        self.state = JobState::Succeeded;
    }

    /// Marks the job as failed. Valid from `Pending` (cancelled before
    /// dispatch) or `Running` (engine failure).
    pub fn fail(&mut self) {
        debug_assert!(
            matches!(self.state, JobState::Pending | JobState::Running),
            "completed job failed again"
        );
        self.state = JobState::Failed;
    }
}
