//! Tracing setup for test binaries

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG` (default `crudmock=debug`).
///
/// Output goes through the test writer so `cargo test` captures it. Safe to
/// call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crudmock=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
