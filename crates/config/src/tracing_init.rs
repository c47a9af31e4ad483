use tracing_subscriber::{fmt, EnvFilter};

use crate::env::LogFormat;

/// Initialize the tracing subscriber with env-based filtering.
///
/// Reads `RUST_LOG` (or `LOG_LEVEL`) to set the filter and falls back to
/// `default_level`. `LogFormat::Json` emits one JSON object per event for log
/// shippers; `Pretty` is the human-readable formatter.
pub fn init_tracing(default_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).with_target(true).init(),
    }
}
