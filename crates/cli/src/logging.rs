//! Logging setup
//!
//! Logs go to stderr so they never mix with command results on stdout.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::dispatcher::GlobalOptions;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the debug flag picks the level.
/// Calling this more than once is harmless.
pub fn init(globals: &GlobalOptions) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(globals)));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(globals.debug),
        )
        .with(filter)
        .try_init();
}

fn default_directive(globals: &GlobalOptions) -> &'static str {
    if globals.debug { "debug" } else { "warn" }
}
