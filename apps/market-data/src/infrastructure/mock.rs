//! In-memory exchange for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{ExchangeError, ExchangePort, KlineQuery};
use crate::domain::market_data::{Candle, DailyStats, PriceQuote, Symbol};

/// Mock exchange backed by in-memory tables.
///
/// Klines are returned as configured, without range filtering. Unknown
/// symbols get the exchange's `-1121 Invalid symbol.` error.
#[derive(Debug, Default)]
pub struct MockExchange {
    candles: RwLock<HashMap<Symbol, Vec<Candle>>>,
    prices: RwLock<HashMap<Symbol, f64>>,
    stats: RwLock<HashMap<Symbol, DailyStats>>,
    failure: RwLock<Option<ExchangeError>>,
    kline_queries: RwLock<Vec<KlineQuery>>,
}

impl MockExchange {
    /// Create an empty mock exchange.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the klines returned for a symbol.
    pub fn set_candles(&self, symbol: &Symbol, candles: Vec<Candle>) {
        self.candles.write().insert(symbol.clone(), candles);
    }

    /// Set the price for a symbol.
    pub fn set_price(&self, symbol: &Symbol, price: f64) {
        self.prices.write().insert(symbol.clone(), price);
    }

    /// Set the 24h statistics for the symbol they carry.
    pub fn set_stats(&self, stats: DailyStats) {
        self.stats.write().insert(stats.symbol.clone(), stats);
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: ExchangeError) {
        *self.failure.write() = Some(error);
    }

    /// Clear a failure set by [`Self::fail_with`].
    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    /// Kline queries received so far, oldest first.
    #[must_use]
    pub fn kline_queries(&self) -> Vec<KlineQuery> {
        self.kline_queries.read().clone()
    }

    fn check_failure(&self) -> Result<(), ExchangeError> {
        self.failure.read().clone().map_or(Ok(()), Err)
    }
}

fn invalid_symbol() -> ExchangeError {
    ExchangeError::Api {
        status: 400,
        code: -1121,
        message: "Invalid symbol.".to_string(),
    }
}

#[async_trait]
impl ExchangePort for MockExchange {
    async fn historical_klines(&self, query: &KlineQuery) -> Result<Vec<Candle>, ExchangeError> {
        self.kline_queries.write().push(query.clone());
        self.check_failure()?;

        Ok(self
            .candles
            .read()
            .get(&query.symbol)
            .cloned()
            .unwrap_or_default())
    }

    async fn symbol_ticker(&self, symbol: &Symbol) -> Result<PriceQuote, ExchangeError> {
        self.check_failure()?;

        self.prices
            .read()
            .get(symbol)
            .map(|price| PriceQuote::new(symbol.clone(), *price))
            .ok_or_else(invalid_symbol)
    }

    async fn ticker_24h(&self, symbol: &Symbol) -> Result<DailyStats, ExchangeError> {
        self.check_failure()?;

        self.stats
            .read()
            .get(symbol)
            .cloned()
            .ok_or_else(invalid_symbol)
    }
}
