//! # Tracing Setup
//!
//! Installs a global `tracing` subscriber. Verbosity comes from `RUST_LOG`
//! when set, otherwise from the level passed in.
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle events
//! RUST_LOG=debug cargo run           # request payloads and query windows
//! RUST_LOG=record_store=debug cargo run
//! ```
//!
//! Tables log with a `table` field ("Product", "Order", ...) instead of the
//! module path, so the target is hidden in the compact format.

use tracing_subscriber::EnvFilter;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn setup_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = match format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .try_init(),
    };

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
