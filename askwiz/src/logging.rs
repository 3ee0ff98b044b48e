//! Diagnostic tracing for the wizard engine.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. It is separate from
//! the prompts and messages shown to the user, which go through
//! [`crate::io::terminal::Terminal`].

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=askwiz=debug askwiz ask "Name?" --name name
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
