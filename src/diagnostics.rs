//! Out-of-band diagnostics for dropped records.
//!
//! The foreign boundary can only say "result" or "no result", so the reason a
//! record was dropped goes to a `tracing` subscriber writing to stderr.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::error::FilterError;

/// Environment variable holding the `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV: &str = "ENRICH_FILTER_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

static INIT: Once = Once::new();

/// Install the stderr subscriber once per process.
///
/// Leaves an already installed global subscriber in place, so a Rust host
/// embedding the crate keeps its own logging.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .try_init();
    });
}

/// Log why a record produced no result.
pub fn report_failure(tag: &str, err: &FilterError) {
    if err.is_record_error() {
        tracing::warn!(tag, error = %err, "record dropped");
    } else {
        tracing::error!(tag, error = %err, "filter call failed");
    }
}
