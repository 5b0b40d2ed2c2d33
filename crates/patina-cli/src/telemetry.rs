//! Logging bootstrap.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PATINA_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr fmt subscriber filtered by `PATINA_LOG` (default `warn`).
/// A malformed filter falls back to the default; a second call is a no-op.
pub fn init() {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
