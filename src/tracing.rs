//! Diagnostic output on stderr
//!
//! The compiled document goes to stdout, so all diagnostics go to stderr
//! through tracing. Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=info` - per-run summary
//! - `RUST_LOG=debug` - per-row interpretation and stanza construction
//! - `RUST_LOG=chordmap::compile=debug` - module-level filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber with a stderr console layer
///
/// Defaults to `warn` when RUST_LOG is unset, so a clean compile is
/// silent apart from the document itself.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
