//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: gateway crates at `info`, the HTTP
/// client and server internals at `warn`.
pub const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn,tower=warn";

/// Initialize JSON logs with timestamps, filtered by `RUST_LOG` or `default`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .with_current_span(false)
        .try_init();
}
