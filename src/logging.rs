// ==========================================
// Customer Analytics - logging setup
// ==========================================
// tracing + tracing-subscriber, level controlled by environment.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the log subscriber.
///
/// # Environment
/// - `RUST_LOG`: filter directive (default: info),
///   e.g. `RUST_LOG=debug` or `RUST_LOG=customer_analytics=trace`
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Test-writer variant at debug level; safe to call repeatedly.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
