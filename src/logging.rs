use std::fs::OpenOptions;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing into `log_file`.
///
/// Logging is disabled when `log_file` is empty: stderr belongs to the
/// compiler and must stay byte-identical to an unwrapped run.
/// The file is opened in append mode because many wrapper processes run in
/// parallel during a build and share one log.
pub fn init_tracing(log_file: &str) {
    if log_file.is_empty() {
        return;
    }

    let filter = EnvFilter::try_from_env("CCACHE_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    // An unopenable log file silently disables logging.
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_file) else {
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
