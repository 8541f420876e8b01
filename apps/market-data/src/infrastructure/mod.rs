//! Infrastructure Layer
//!
//! Driven adapters: the Binance REST client, an in-memory exchange,
//! configuration loading and metrics.

pub mod binance;
pub mod config;
pub mod metrics;
pub mod mock;

pub use binance::{BinanceConfig, BinanceEnvironment, BinanceError, BinanceExchangeAdapter};
pub use config::{AppConfig, ConfigError};
pub use mock::MockExchange;
