//! Domain Layer
//!
//! Market data value objects with no infrastructure dependencies.
//!
//! - [`market_data`]: symbols, kline intervals, candles, tickers
//! - [`errors`]: validation errors raised while building domain values

pub mod errors;
pub mod market_data;

pub use errors::DomainError;
