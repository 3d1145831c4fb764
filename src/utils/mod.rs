pub mod error;
pub mod fs;
pub mod logging;
pub mod preview;

pub use error::{CompressorError, CompressorResult, JobError, JobErrorKind};
pub use fs::{format_bytes, unique_name};
pub use logging::init_tracing;
pub use preview::encode_preview;
