//! Logging utilities for migration diagnostics.
//!
//! Diagnostics always go to standard error. Standard output is reserved for
//! the generated configuration so it can be redirected to a file safely.

// Re-exports for convenience
pub use tracing::metadata::LevelFilter;
pub use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter, Layer};

/// Set up basic logging
pub fn setup(level: Option<LevelFilter>) {
    // The input level overrides any env vars.
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        // The user can specify a log level via an env var
        // (such as for testing).
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter)
        .boxed();

    // A subscriber may already be installed (e.g. by a test harness).
    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        debug!("logging was already set up");
        return;
    }

    debug!("logging set up");
}
