//! Configuration
//!
//! Environment-driven settings for the Binance adapter and the CLI.

mod settings;

pub use settings::{AppConfig, ConfigError, DEFAULT_TRADING_PAIRS};
