//! Diagnostic logging setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `SWAG_LOG=swag_commerce=debug`.
pub const LOG_ENV: &str = "SWAG_LOG";

/// Install the stderr subscriber.
///
/// `SWAG_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    // Fails only when a subscriber is already installed.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
