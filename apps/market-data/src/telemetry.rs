//! Logging Setup
//!
//! Console tracing for the CLI. Logs go to stderr so stdout stays clean
//! for JSON output.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives (default: `binance_market_data=info`)

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "binance_market_data=info";

/// Initialize the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
