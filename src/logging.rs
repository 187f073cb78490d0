use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default directive when RUST_LOG is unset
pub const DEFAULT_FILTER: &str = "sales_analytics=info";

/// Initializes console logging on stderr, filtered by `RUST_LOG`.
///
/// Stdout stays reserved for step narration and JSON output. Calling this
/// twice is harmless: the second subscriber is simply not installed.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
