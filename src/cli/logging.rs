//! Logging initialization

/// Initialize logging to stderr
///
/// Quiet by default; `--debug` turns on debug logs for this crate. RUST_LOG
/// overrides both.
pub fn init_logging(debug: bool) {
    let default_filter = if debug { "rcmate=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(debug)
        .init();
}
