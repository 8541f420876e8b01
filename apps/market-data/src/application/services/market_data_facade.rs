//! Market Data Facade
//!
//! Translates narrow market data requests into exchange port calls and
//! returns normalized results.
//!
//! Two flavours of every read:
//!
//! - `try_*` returns `Result<_, MarketDataError>`, so callers can tell an
//!   empty range apart from a failed call.
//! - `fetch_*` is fail-soft: failures are logged and counted, and the caller
//!   gets an empty series or `None`.
//!
//! Each call is a single stateless round trip through the port. There is no
//! retry and no backoff.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ExchangeError, ExchangePort, KlineQuery};
use crate::domain::DomainError;
use crate::domain::market_data::{CandleSeries, DailyStats, KlineInterval, PriceQuote, Symbol};
use crate::infrastructure::metrics;

/// Lookback window used when the caller does not pick one.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Failure of a facade operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// Arguments rejected before any network call.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// The exchange call failed.
    #[error("Exchange call failed: {0}")]
    ExchangeCall(#[from] ExchangeError),
}

/// A symbol the exchange did not answer a ticker request for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailablePair {
    /// The symbol that was checked.
    pub symbol: Symbol,
    /// Why the ticker request failed.
    pub reason: String,
}

/// Result of probing a list of trading pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAvailabilityReport {
    /// Pairs that returned a ticker, in input order.
    pub available: Vec<Symbol>,
    /// Pairs that failed, in input order.
    pub unavailable: Vec<UnavailablePair>,
}

/// Facade over one exchange client handle.
///
/// The handle is created once and shared read-only by every call.
#[derive(Debug)]
pub struct MarketDataFacade<E> {
    exchange: E,
}

impl<E: ExchangePort> MarketDataFacade<E> {
    /// Wrap an exchange client.
    #[must_use]
    pub const fn new(exchange: E) -> Self {
        Self { exchange }
    }

    /// The underlying exchange client.
    #[must_use]
    pub const fn exchange(&self) -> &E {
        &self.exchange
    }

    // =========================================================================
    // Historical candles
    // =========================================================================

    /// Candles from `now - lookback_days` to `now`, oldest first.
    pub async fn try_fetch_historical_candles(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        lookback_days: u32,
    ) -> Result<CandleSeries, MarketDataError> {
        if lookback_days == 0 {
            return Err(DomainError::invalid(
                "lookback_days",
                "must be a positive number of days",
            )
            .into());
        }

        let end = Utc::now();
        let start = end
            .checked_sub_signed(TimeDelta::days(i64::from(lookback_days)))
            .ok_or_else(|| {
                DomainError::invalid(
                    "lookback_days",
                    format!("{lookback_days} days reaches before the earliest representable time"),
                )
            })?;

        self.try_fetch_historical_candles_between(symbol, interval, start, end)
            .await
    }

    /// Candles whose open time lies in `start..=end`, oldest first.
    pub async fn try_fetch_historical_candles_between(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<CandleSeries, MarketDataError> {
        if start > end {
            return Err(DomainError::invalid("start", "must not be after end").into());
        }

        let query = KlineQuery::new(symbol.clone(), interval, start, end);
        let candles = self.exchange.historical_klines(&query).await?;

        tracing::debug!(
            symbol = %symbol,
            interval = %interval,
            count = candles.len(),
            "Fetched historical candles"
        );

        Ok(CandleSeries::new(symbol.clone(), interval, candles))
    }

    /// Fail-soft variant of [`Self::try_fetch_historical_candles`].
    ///
    /// Returns an empty series on any failure. An empty result therefore
    /// means either "no data in range" or "request failed".
    pub async fn fetch_historical_candles(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        lookback_days: u32,
    ) -> CandleSeries {
        match self
            .try_fetch_historical_candles(symbol, interval, lookback_days)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                tracing::error!(
                    operation = "fetch_historical_candles",
                    symbol = %symbol,
                    interval = %interval,
                    lookback_days,
                    error = %e,
                    "Error fetching historical data"
                );
                metrics::record_fetch_failure("fetch_historical_candles");
                CandleSeries::empty(symbol.clone(), interval)
            }
        }
    }

    // =========================================================================
    // Current price
    // =========================================================================

    /// Latest price for `symbol`.
    pub async fn try_fetch_current_price(
        &self,
        symbol: &Symbol,
    ) -> Result<PriceQuote, MarketDataError> {
        Ok(self.exchange.symbol_ticker(symbol).await?)
    }

    /// Fail-soft variant of [`Self::try_fetch_current_price`].
    pub async fn fetch_current_price(&self, symbol: &Symbol) -> Option<f64> {
        match self.try_fetch_current_price(symbol).await {
            Ok(quote) => Some(quote.price),
            Err(e) => {
                tracing::error!(
                    operation = "fetch_current_price",
                    symbol = %symbol,
                    error = %e,
                    "Error fetching current price"
                );
                metrics::record_fetch_failure("fetch_current_price");
                None
            }
        }
    }

    // =========================================================================
    // 24h statistics
    // =========================================================================

    /// Trailing 24h statistics for `symbol`.
    pub async fn try_fetch_daily_stats(
        &self,
        symbol: &Symbol,
    ) -> Result<DailyStats, MarketDataError> {
        Ok(self.exchange.ticker_24h(symbol).await?)
    }

    /// Fail-soft variant of [`Self::try_fetch_daily_stats`].
    pub async fn fetch_daily_stats(&self, symbol: &Symbol) -> Option<DailyStats> {
        match self.try_fetch_daily_stats(symbol).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::error!(
                    operation = "fetch_daily_stats",
                    symbol = %symbol,
                    error = %e,
                    "Error fetching 24h stats"
                );
                metrics::record_fetch_failure("fetch_daily_stats");
                None
            }
        }
    }

    // =========================================================================
    // Pair availability
    // =========================================================================

    /// Probe each symbol with one ticker request, sequentially.
    pub async fn check_pair_availability(&self, symbols: &[Symbol]) -> PairAvailabilityReport {
        let mut report = PairAvailabilityReport::default();

        for symbol in symbols {
            match self.exchange.symbol_ticker(symbol).await {
                Ok(_) => {
                    tracing::info!(symbol = %symbol, "Trading pair available");
                    report.available.push(symbol.clone());
                }
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Trading pair unavailable");
                    report.unavailable.push(UnavailablePair {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::market_data::Candle;
    use crate::infrastructure::mock::MockExchange;

    fn btc() -> Symbol {
        Symbol::new("BTCUSDT").unwrap()
    }

    fn daily_candle(day: u32, close: f64) -> Candle {
        let open_time = Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap();
        Candle {
            open_time,
            open: 100.0,
            high: 120.0,
            low: 80.0,
            close,
            volume: 10.0,
            close_time: open_time + TimeDelta::days(1) - TimeDelta::milliseconds(1),
            quote_volume: 1_000.0,
            trade_count: 7,
            taker_buy_base_volume: 5.0,
            taker_buy_quote_volume: 500.0,
        }
    }

    #[tokio::test]
    async fn historical_candles_span_lookback_window() {
        let exchange = MockExchange::new();
        exchange.set_candles(&btc(), (1..=7).map(|d| daily_candle(d, 100.0)).collect());
        let facade = MarketDataFacade::new(exchange);

        let series = facade
            .fetch_historical_candles(&btc(), KlineInterval::OneDay, DEFAULT_LOOKBACK_DAYS)
            .await;
        assert_eq!(series.len(), 7);

        let queries = facade.exchange().kline_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].end - queries[0].start, TimeDelta::days(7));
        assert_eq!(queries[0].interval, KlineInterval::OneDay);
    }

    #[tokio::test]
    async fn historical_candles_are_sorted_and_unique() {
        let exchange = MockExchange::new();
        exchange.set_candles(
            &btc(),
            vec![
                daily_candle(3, 3.0),
                daily_candle(1, 1.0),
                daily_candle(2, 2.0),
                daily_candle(2, 2.5),
            ],
        );
        let facade = MarketDataFacade::new(exchange);

        let series = facade
            .fetch_historical_candles(&btc(), KlineInterval::OneDay, 7)
            .await;
        assert_eq!(series.closes(), vec![1.0, 2.5, 3.0]);
    }

    #[tokio::test]
    async fn zero_lookback_is_rejected_without_network_call() {
        let facade = MarketDataFacade::new(MockExchange::new());

        let err = facade
            .try_fetch_historical_candles(&btc(), KlineInterval::OneHour, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidRequest(_)));
        assert!(facade.exchange().kline_queries().is_empty());

        let series = facade
            .fetch_historical_candles(&btc(), KlineInterval::OneHour, 0)
            .await;
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let facade = MarketDataFacade::new(MockExchange::new());
        let start = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let result = facade
            .try_fetch_historical_candles_between(&btc(), KlineInterval::OneHour, start, end)
            .await;
        assert!(matches!(result, Err(MarketDataError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn failures_are_soft() {
        let exchange = MockExchange::new();
        exchange.fail_with(ExchangeError::Connection {
            message: "connection refused".to_string(),
        });
        let facade = MarketDataFacade::new(exchange);

        assert!(
            facade
                .fetch_historical_candles(&btc(), KlineInterval::OneDay, 7)
                .await
                .is_empty()
        );
        assert!(facade.fetch_current_price(&btc()).await.is_none());
        assert!(facade.fetch_daily_stats(&btc()).await.is_none());
    }

    #[tokio::test]
    async fn typed_variants_surface_the_exchange_error() {
        let exchange = MockExchange::new();
        exchange.fail_with(ExchangeError::RateLimited {
            retry_after_secs: Some(5),
        });
        let facade = MarketDataFacade::new(exchange);

        let err = facade.try_fetch_current_price(&btc()).await.unwrap_err();
        assert_eq!(
            err,
            MarketDataError::ExchangeCall(ExchangeError::RateLimited {
                retry_after_secs: Some(5)
            })
        );
    }

    #[tokio::test]
    async fn current_price_and_stats() {
        let exchange = MockExchange::new();
        exchange.set_price(&btc(), 65_000.12);
        exchange.set_stats(DailyStats {
            symbol: btc(),
            price_change: 120.5,
            price_change_percent: 1.9,
            volume: 1000.0,
            quote_volume: 65_000_000.0,
        });
        let facade = MarketDataFacade::new(exchange);

        assert_eq!(facade.fetch_current_price(&btc()).await, Some(65_000.12));

        let stats = facade.fetch_daily_stats(&btc()).await.unwrap();
        assert_eq!(stats.price_change, 120.5);
        assert_eq!(stats.price_change_percent, 1.9);
        assert_eq!(stats.volume, 1000.0);
        assert_eq!(stats.quote_volume, 65_000_000.0);
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let exchange = MockExchange::new();
        exchange.set_price(&btc(), 42.0);
        exchange.set_candles(&btc(), (1..=3).map(|d| daily_candle(d, 1.0)).collect());
        let facade = MarketDataFacade::new(exchange);

        let first = facade.fetch_current_price(&btc()).await;
        let second = facade.fetch_current_price(&btc()).await;
        assert_eq!(first, second);

        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let a = facade
            .try_fetch_historical_candles_between(&btc(), KlineInterval::OneDay, start, end)
            .await
            .unwrap();
        let b = facade
            .try_fetch_historical_candles_between(&btc(), KlineInterval::OneDay, start, end)
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn pair_availability_splits_known_and_unknown() {
        let exchange = MockExchange::new();
        exchange.set_price(&btc(), 65_000.0);
        let facade = MarketDataFacade::new(exchange);

        let unknown = Symbol::new("MOONUSDT").unwrap();
        let report = facade
            .check_pair_availability(&[btc(), unknown.clone()])
            .await;

        assert_eq!(report.available, vec![btc()]);
        assert_eq!(report.unavailable.len(), 1);
        assert_eq!(report.unavailable[0].symbol, unknown);
        assert!(report.unavailable[0].reason.contains("-1121"));
    }
}
