use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr.
///
/// - RUST_LOG wins when set; otherwise `fallback_level` (the `log_level` setting)
/// - stdout is left for command output
/// - Safe to call more than once; later calls are ignored
pub fn init(fallback_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();

    tracing::debug!("Tracing initialized");
}
