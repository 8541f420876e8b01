//! Binance Spot Market Data Adapter
//!
//! Implementation of `ExchangePort` for the public Binance REST API:
//! - Paginated historical klines
//! - Symbol price ticker and 24h ticker statistics
//! - Status-aware error mapping (auth, rate limit, IP ban, API codes)
//!
//! Requests are made once. There is no retry or backoff layer.

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::BinanceExchangeAdapter;
pub use config::{BinanceConfig, BinanceEnvironment, Credentials, MAX_KLINE_PAGE_LIMIT};
pub use error::BinanceError;
pub use http_client::BinanceHttpClient;
