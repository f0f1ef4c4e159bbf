//! Test helpers shared by unit and integration tests.

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Installs a test-friendly `tracing` subscriber once per process.
///
/// Output goes through the test harness writer so it is only shown for
/// failing tests. `RUST_LOG` overrides the default `feedweave=debug` filter.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("feedweave=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Logs the start of a named test and installs test logging.
pub fn init_test(name: &str) {
    init_test_logging();
    tracing::info!(test = name, "test start");
}
