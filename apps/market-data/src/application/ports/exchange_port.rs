//! Exchange Port (Driven Port)
//!
//! Read-only market data surface of a trading exchange: historical klines,
//! symbol ticker, 24h ticker statistics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::market_data::{Candle, DailyStats, KlineInterval, PriceQuote, Symbol};

/// Historical kline request for a closed time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlineQuery {
    /// Trading pair.
    pub symbol: Symbol,
    /// Candle granularity.
    pub interval: KlineInterval,
    /// Earliest open time to include.
    pub start: DateTime<Utc>,
    /// Latest open time to include.
    pub end: DateTime<Utc>,
}

impl KlineQuery {
    /// Create a new query.
    #[must_use]
    pub const fn new(
        symbol: Symbol,
        interval: KlineInterval,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol,
            interval,
            start,
            end,
        }
    }
}

/// Failure of a call against the exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("Exchange connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Credentials missing, invalid or lacking permission.
    #[error("Exchange authentication failed: {message}")]
    Authentication {
        /// Error details.
        message: String,
    },

    /// Request weight or order rate limit exceeded.
    #[error("Exchange rate limit exceeded")]
    RateLimited {
        /// Server-suggested delay, when provided.
        retry_after_secs: Option<u64>,
    },

    /// Exchange rejected the request.
    #[error("Exchange API error (HTTP {status}, code {code}): {message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Exchange error code.
        code: i64,
        /// Exchange error message.
        message: String,
    },

    /// Response could not be decoded into market data.
    #[error("Invalid exchange response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Port for reading market data from an exchange.
///
/// Every call is a single logical request; implementations do not retry.
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Candles whose open time falls within `query.start..=query.end`, in
    /// the order the exchange returned them.
    async fn historical_klines(&self, query: &KlineQuery) -> Result<Vec<Candle>, ExchangeError>;

    /// Latest price for a symbol.
    async fn symbol_ticker(&self, symbol: &Symbol) -> Result<PriceQuote, ExchangeError>;

    /// Trailing 24h statistics for a symbol.
    async fn ticker_24h(&self, symbol: &Symbol) -> Result<DailyStats, ExchangeError>;
}
