use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber for binaries and tests.
///
/// Honors `RUST_LOG`, defaulting to `debug` for this crate. Safe to call
/// more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("image_compressor=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_target(false)       // Remove module path
        .with_writer(std::io::stdout)
        .compact();               // Use compact formatter instead of pretty

    let _ = subscriber.try_init();
}
