pub mod laws;

use tracing_subscriber::EnvFilter;

/// Route `basis`'s tracing output to the test harness, filtered by `RUST_LOG`.
///
/// Safe to call from every test: only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
