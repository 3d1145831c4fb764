//! The job orchestrator: turns a batch plus settings into dispatched
//! compression work and reconciles the results into a [`ResultSet`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, info, warn};

use crate::core::{
    BatchProgress, CompressionJob, CompressionResult, CompressionSettings, InputImage, ResultSet,
};
use crate::engine::CompressionEngine;
use crate::processing::validation::validate_run;
use crate::utils::{CompressorError, CompressorResult, JobError, JobErrorKind};

/// What a completed run hands to the presentation layer.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub results: ResultSet,
    pub diagnostics: String,
}

/// Lightweight per-slot record kept outside the workers, so a slot can
/// still be filled if its worker dies without reporting.
struct SlotMeta {
    original_name: String,
    compressed_name: String,
    original_size: u64,
}

/// Drives one batch of compression jobs through the engine.
///
/// A single implementation covers both dispatch modes: `concurrency`
/// bounds the worker pool, and 1 degenerates to the sequential path.
/// Per-job failures are absorbed into the result set; the run itself
/// only fails on preconditions (empty batch, invalid settings) or an
/// unreachable engine, before any job is dispatched.
pub struct JobOrchestrator {
    engine: Arc<dyn CompressionEngine>,
    cancelled: Arc<AtomicBool>,
}

impl JobOrchestrator {
    pub fn new(engine: Arc<dyn CompressionEngine>) -> Self {
        Self {
            engine,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests cancellation of the current run. Best-effort and
    /// cooperative: in-flight jobs drain, queued jobs are recorded as
    /// `Failed { Cancelled }`. Returns once no new job will start, not
    /// once in-flight jobs have finished.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Processes the batch in index order with a single worker.
    pub async fn run_sequential(
        &self,
        batch: Vec<InputImage>,
        settings: &CompressionSettings,
    ) -> CompressorResult<RunReport> {
        self.run(batch, settings, 1).await
    }

    /// Processes the batch across up to `concurrency` workers.
    pub async fn run(
        &self,
        batch: Vec<InputImage>,
        settings: &CompressionSettings,
        concurrency: usize,
    ) -> CompressorResult<RunReport> {
        self.run_with_progress(batch, settings, concurrency, |_| {}).await
    }

    /// Like [`run`](Self::run), reporting progress once at dispatch and
    /// once per filled slot.
    pub async fn run_with_progress(
        &self,
        batch: Vec<InputImage>,
        settings: &CompressionSettings,
        concurrency: usize,
        progress_callback: impl Fn(BatchProgress) + Send + 'static,
    ) -> CompressorResult<RunReport> {
        validate_run(&batch, settings)?;

        self.engine
            .probe()
            .map_err(|e| CompressorError::engine_unavailable(e.to_string()))?;

        // Each run is its own state machine; a cancel from a previous
        // run must not leak into this one.
        self.cancelled.store(false, Ordering::SeqCst);

        let concurrency = concurrency.max(1);
        let total_jobs = batch.len();
        let started = Instant::now();
        info!(
            "Dispatching {} jobs across {} worker{} ({:?}, quality {})",
            total_jobs,
            concurrency,
            if concurrency == 1 { "" } else { "s" },
            settings.method,
            settings.quality
        );

        // Every job takes its own settings snapshot at run start.
        let jobs: Vec<CompressionJob> = batch
            .into_iter()
            .map(|input| CompressionJob::new(input, settings.clone()))
            .collect();

        let metas: Vec<SlotMeta> = jobs
            .iter()
            .map(|job| SlotMeta {
                original_name: job.input.filename.clone(),
                compressed_name: job.input.compressed_name(job.settings.method),
                original_size: job.input.size(),
            })
            .collect();

        let semaphore = Arc::new(Semaphore::new(concurrency));
        let handles: Vec<task::JoinHandle<CompressionResult>> = jobs
            .into_iter()
            .map(|job| {
                let semaphore = Arc::clone(&semaphore);
                let cancelled = Arc::clone(&self.cancelled);
                let engine = Arc::clone(&self.engine);
                task::spawn(run_job(engine, job, semaphore, cancelled))
            })
            .collect();

        progress_callback(BatchProgress {
            total_jobs,
            completed_jobs: 0,
            succeeded: 0,
            failed: 0,
        });

        // Fixed, index-addressed slot array: each job reports exactly
        // one result for its own slot.
        let mut slots: Vec<Option<CompressionResult>> = (0..total_jobs).map(|_| None).collect();
        let mut succeeded = 0;
        let mut failed = 0;

        for (index, (handle, meta)) in handles.into_iter().zip(metas).enumerate() {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Worker for job {} aborted: {}", index, e);
                    CompressionResult::aborted(
                        index,
                        meta.original_name,
                        meta.compressed_name,
                        meta.original_size,
                        JobError::new(JobErrorKind::EncodeError, format!("worker aborted: {}", e)),
                    )
                }
            };

            if result.is_success() {
                succeeded += 1;
            } else {
                failed += 1;
            }
            let slot = result.index;
            slots[slot] = Some(result);

            progress_callback(BatchProgress {
                total_jobs,
                completed_jobs: succeeded + failed,
                succeeded,
                failed,
            });
        }

        let entries: Vec<CompressionResult> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(result) => result,
                // Unreachable: every handle fills its own slot above.
                None => {
                    warn!("Slot {} left unset, recording as aborted", index);
                    CompressionResult::aborted(
                        index,
                        String::new(),
                        String::new(),
                        0,
                        JobError::new(JobErrorKind::EncodeError, "result slot never filled"),
                    )
                }
            })
            .collect();

        let results = ResultSet::publish(entries);
        let diagnostics = results.diagnostics();
        info!(
            "Run complete: {}/{} succeeded, {} failed in {}ms",
            succeeded,
            total_jobs,
            failed,
            started.elapsed().as_millis()
        );

        Ok(RunReport { results, diagnostics })
    }
}

/// One worker's journey: wait for a pool slot, honor cancellation,
/// then hand the bytes to the engine on a blocking thread.
async fn run_job(
    engine: Arc<dyn CompressionEngine>,
    mut job: CompressionJob,
    semaphore: Arc<Semaphore>,
    cancelled: Arc<AtomicBool>,
) -> CompressionResult {
    let method = job.settings.method;

    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            job.fail();
            warn!("Job {} could not acquire a worker: {}", job.index(), e);
            return CompressionResult::failed(
                &job.input,
                method,
                JobError::new(JobErrorKind::IoError, format!("worker pool closed: {}", e)),
            );
        }
    };

    if cancelled.load(Ordering::SeqCst) {
        job.fail();
        debug!("Job {} dropped before dispatch (cancelled)", job.index());
        return CompressionResult::failed(&job.input, method, JobError::cancelled());
    }

    job.start();
    debug!("Job {} started: {}", job.index(), job.input.filename);

    // The compress call is CPU-bound; keep it off the async workers.
    let engine_call = {
        let engine = Arc::clone(&engine);
        let bytes = job.input.bytes.clone();
        let settings = job.settings.clone();
        task::spawn_blocking(move || engine.compress(&bytes, &settings))
    };

    match engine_call.await {
        Ok(Ok(compressed)) => {
            job.succeed();
            debug!(
                "Job {} succeeded: {} -> {} bytes",
                job.index(),
                job.input.size(),
                compressed.len()
            );
            CompressionResult::succeeded(&job.input, method, compressed)
        }
        Ok(Err(e)) => {
            job.fail();
            warn!("Job {} failed: {}", job.index(), e);
            CompressionResult::failed(&job.input, method, e.into_job_error())
        }
        Err(e) => {
            job.fail();
            warn!("Job {} engine call aborted: {}", job.index(), e);
            CompressionResult::failed(
                &job.input,
                method,
                JobError::new(JobErrorKind::EncodeError, format!("engine panicked: {}", e)),
            )
        }
    }
}
