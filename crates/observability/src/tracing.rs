//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Service logs at `info`; `tower_http` request spans need `debug`.
const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

/// Filter from `RUST_LOG`, or [`DEFAULT_DIRECTIVES`] when unset or invalid.
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// JSON lines with timestamps and span context. Repeat calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
