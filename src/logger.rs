use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr, filtered by `RUST_LOG`
/// (default `warn`). Calling it twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
