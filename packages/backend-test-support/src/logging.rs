//! Unified test logging initialization.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter directive for tests: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn filter_directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe; output goes through the test writer so
/// cargo/nextest capture it.
///
/// ```bash
/// TEST_LOG=academy_backend=debug cargo test -p academy-backend
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(EnvFilter::new(filter_directive()))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
