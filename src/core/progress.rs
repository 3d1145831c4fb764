//! Progress reporting for batch runs.

use serde::Serialize;

/// Snapshot of a batch run's progress, sent to the registered callback
/// once at dispatch and once per filled result slot.
#[derive(Debug, Clone, Serialize)]
pub struct BatchProgress {
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchProgress {
    pub fn percentage(&self) -> usize {
        if self.total_jobs == 0 {
            return 0;
        }
        self.completed_jobs * 100 / self.total_jobs
    }

    pub fn is_complete(&self) -> bool {
        self.completed_jobs == self.total_jobs
    }
}
