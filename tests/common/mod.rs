//! Shared test doubles: scripted engines and capturing sinks.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use image_compressor::{CompressionEngine, CompressionSettings, EngineError, ExportSink, InputImage};

type Behavior = Box<dyn Fn(&[u8], &CompressionSettings) -> Result<Vec<u8>, EngineError> + Send + Sync>;

/// Engine double driven by a closure, with call accounting.
///
/// Outcomes must depend only on the input bytes and settings so the
/// sequential/parallel equivalence property holds by construction.
pub struct MockEngine {
    behavior: Behavior,
    probe_error: Option<EngineError>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockEngine {
    pub fn from_fn(
        behavior: impl Fn(&[u8], &CompressionSettings) -> Result<Vec<u8>, EngineError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            behavior: Box::new(behavior),
            probe_error: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Deterministic engine emitting half the input size.
    pub fn halving() -> Self {
        Self::from_fn(|bytes, _| Ok(vec![0xC0; bytes.len() / 2]))
    }

    /// Engine scripted per input size: `input len -> outcome`.
    pub fn scripted(script: HashMap<usize, Result<usize, EngineError>>) -> Self {
        Self::from_fn(move |bytes, _| match script.get(&bytes.len()) {
            Some(Ok(out_len)) => Ok(vec![0xC0; *out_len]),
            Some(Err(e)) => Err(e.clone()),
            None => Err(EngineError::UnsupportedFormat(format!(
                "no script entry for {} bytes",
                bytes.len()
            ))),
        })
    }

    /// Engine whose readiness probe fails, as when the codec backend is
    /// missing at runtime.
    pub fn unavailable(message: &str) -> Self {
        let mut engine = Self::halving();
        engine.probe_error = Some(EngineError::Io(message.to_string()));
        engine
    }

    /// Adds a fixed per-call delay, for scheduling-sensitive tests.
    pub fn with_delay(self, delay: std::time::Duration) -> Self {
        let Self { behavior, probe_error, calls, in_flight, max_in_flight } = self;
        Self {
            behavior: Box::new(move |bytes, settings| {
                std::thread::sleep(delay);
                behavior(bytes, settings)
            }),
            probe_error,
            calls,
            in_flight,
            max_in_flight,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CompressionEngine for MockEngine {
    fn compress(&self, image: &[u8], settings: &CompressionSettings) -> Result<Vec<u8>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = (self.behavior)(image, settings);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn probe(&self) -> Result<(), EngineError> {
        match &self.probe_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Export sink capturing writes in memory; optionally rejects names.
#[derive(Default)]
pub struct CapturingSink {
    pub writes: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    pub reject_containing: Option<String>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(fragment: &str) -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            reject_containing: Some(fragment.to_string()),
        }
    }

    pub fn written_names(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(path, _)| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect()
    }
}

impl ExportSink for CapturingSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        if let Some(fragment) = &self.reject_containing {
            if path.to_string_lossy().contains(fragment.as_str()) {
                anyhow::bail!("disk full");
            }
        }
        self.writes.lock().unwrap().push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

/// Builds a batch of inputs with the given names and byte counts,
/// indexed in order.
pub fn batch(entries: &[(&str, usize)]) -> Vec<InputImage> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (name, size))| InputImage::new(*name, vec![0xAB; *size], index))
        .collect()
}
