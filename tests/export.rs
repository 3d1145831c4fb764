//! Export integration tests: flat placement, skipping, collisions.

mod common;

use std::collections::HashMap;
use std::path::Path;

use common::{batch, CapturingSink, MockEngine};
use image_compressor::{
    CompressionSettings, CompressorError, EngineError, ExportCoordinator, FsExportSink,
    JobOrchestrator, RunReport,
};

async fn run_mixed_batch() -> RunReport {
    // Two successes and one failure.
    let script: HashMap<usize, Result<usize, EngineError>> = HashMap::from([
        (1000, Ok(500)),
        (2000, Err(EngineError::Encode("corrupt".into()))),
        (3000, Ok(1500)),
    ]);
    let orch = JobOrchestrator::new(std::sync::Arc::new(MockEngine::scripted(script)));
    orch.run_sequential(
        batch(&[("alpha.jpg", 1000), ("beta.jpg", 2000), ("gamma.jpg", 3000)]),
        &CompressionSettings::default(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn export_writes_only_successful_results() {
    let report = run_mixed_batch().await;
    let dir = tempfile::tempdir().unwrap();

    let written = report
        .results
        .export(dir.path(), &FsExportSink)
        .unwrap();
    assert_eq!(written, 2);

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["alpha_compressed.webp", "gamma_compressed.webp"]);

    // Exported bytes are the engine's output, byte for byte.
    let alpha = std::fs::read(dir.path().join("alpha_compressed.webp")).unwrap();
    assert_eq!(alpha.len(), 500);
}

#[tokio::test]
async fn export_rejects_missing_destination() {
    let report = run_mixed_batch().await;
    let err = report
        .results
        .export(Path::new("/nonexistent/export/dir"), &FsExportSink)
        .unwrap_err();
    assert!(matches!(err, CompressorError::Export(_)));
}

#[tokio::test]
async fn colliding_output_names_are_suffixed() {
    // Same stem, different source extensions: both map to
    // shot_compressed.webp under a webp method.
    let orch = JobOrchestrator::new(std::sync::Arc::new(MockEngine::halving()));
    let report = orch
        .run_sequential(batch(&[("shot.jpg", 100), ("shot.png", 200)]), &CompressionSettings::default())
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let sink = CapturingSink::new();
    let written = report.results.export(dir.path(), &sink).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        sink.written_names(),
        vec!["shot_compressed.webp", "shot_compressed_1.webp"]
    );
}

#[tokio::test]
async fn coordinator_surfaces_counts_and_per_file_failures() {
    let report = run_mixed_batch().await;
    let dir = tempfile::tempdir().unwrap();

    // The sink rejects gamma's file; alpha still lands (best-effort,
    // no rollback).
    let coordinator = ExportCoordinator::with_sink(dir.path(), CapturingSink::rejecting("gamma"));
    let summary = coordinator.export(&report.results).unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped_failures, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, "gamma_compressed.webp");
    assert!(summary.failures[0].1.contains("disk full"));
}

#[tokio::test]
async fn coordinator_with_fs_sink_round_trips() {
    let report = run_mixed_batch().await;
    let dir = tempfile::tempdir().unwrap();

    let coordinator = ExportCoordinator::new(dir.path());
    let summary = coordinator.export(&report.results).unwrap();

    assert_eq!(summary.written, 2);
    assert_eq!(summary.skipped_failures, 1);
    assert!(summary.failures.is_empty());
    assert!(dir.path().join("alpha_compressed.webp").is_file());
}
