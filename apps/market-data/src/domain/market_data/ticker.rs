//! Ticker snapshots: current price and trailing 24h statistics.

use serde::{Deserialize, Serialize};

use super::Symbol;

/// Latest price for a symbol, valid only at the instant it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Trading pair.
    pub symbol: Symbol,
    /// Last traded price.
    pub price: f64,
}

impl PriceQuote {
    /// Create a new quote.
    #[must_use]
    pub const fn new(symbol: Symbol, price: f64) -> Self {
        Self { symbol, price }
    }
}

/// 24-hour rolling window statistics. The window is defined by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Trading pair.
    pub symbol: Symbol,
    /// Absolute price change over the window.
    pub price_change: f64,
    /// Price change in percent.
    pub price_change_percent: f64,
    /// Base asset volume.
    pub volume: f64,
    /// Quote asset volume.
    pub quote_volume: f64,
}
