//! Tracing initialization for tests and binaries
//!
//! Output is filtered through `RUST_LOG`:
//! - `RUST_LOG=harq=debug` - codec construction and Chase decisions
//! - `RUST_LOG=harq::hamming=trace` - every syndrome and decode status
//! - `RUST_LOG=harq=info,harq::chase=trace` - mixed levels

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for tests; repeated calls are no-ops
pub fn init_test_tracing() {
    use once_cell::sync::Lazy;

    static TRACING: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("harq=warn"));

        // another harness may already have installed a subscriber
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_test_writer()
            .try_init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for binaries; call once early in `main()`
///
/// Logs go to stderr so CSV written to stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("harq=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}
