//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The planner emits `debug!` events for every accepted change. Level:
//! 1. `debug` when `--verbose` is set
//! 2. otherwise the `GANTT_LOG` environment variable (an `EnvFilter` directive)
//! 3. default to `warn`

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "GANTT_LOG";

/// Initialise the global subscriber. Logs go to stderr so that JSON output
/// on stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
