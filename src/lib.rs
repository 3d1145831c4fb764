// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod engine;
pub mod settings;
pub mod export;
pub mod processing;

// Public exports for external consumers
pub use crate::core::{
    BatchProgress, CompressionJob, CompressionMethod, CompressionResult, CompressionSettings,
    IngestBuffer, InputImage, JobState, ResultSet,
};
pub use crate::engine::{CompressionEngine, EngineError};
pub use crate::export::{ExportCoordinator, ExportReport, ExportSink, FsExportSink};
pub use crate::processing::{JobOrchestrator, RunReport};
pub use crate::settings::{SettingsPersistence, SettingsStore};
pub use crate::utils::{CompressorError, CompressorResult, JobError, JobErrorKind};

// This library is the compression core consumed by the desktop shell;
// the UI, file pickers and codec engines live in other crates.
