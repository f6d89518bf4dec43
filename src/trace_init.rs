//! Tracing sinks. Without the `trace` feature every event is compiled out
//! and these functions do nothing.

#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

#[cfg(feature = "trace")]
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nextword=debug"))
}

/// JSON lines under `log_dir`, one file per day. For embedding hosts.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &std::path::Path) {
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::daily(log_dir, "nextword-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard); // flushed for the lifetime of the host process

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_thread_names(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(env_filter())
            .init();
    });
}

/// Human-readable events on stderr. For the command-line tool.
#[cfg(feature = "trace")]
pub fn init_stderr() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .compact()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter())
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}

#[cfg(not(feature = "trace"))]
pub fn init_stderr() {}
