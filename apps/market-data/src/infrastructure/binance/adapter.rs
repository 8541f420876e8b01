//! Binance exchange adapter implementing `ExchangePort`.

use async_trait::async_trait;

use crate::application::ports::{ExchangeError, ExchangePort, KlineQuery};
use crate::domain::market_data::{Candle, DailyStats, PriceQuote, Symbol};

use super::api_types::{RawKline, SymbolPriceResponse, Ticker24hResponse};
use super::config::{BinanceConfig, BinanceEnvironment};
use super::error::BinanceError;
use super::http_client::BinanceHttpClient;

/// Binance spot market data adapter.
///
/// Implements `ExchangePort` for the public Binance REST API. Holds one
/// pooled HTTP client, shared by every call.
#[derive(Debug, Clone)]
pub struct BinanceExchangeAdapter {
    client: BinanceHttpClient,
    environment: BinanceEnvironment,
    kline_page_limit: u16,
}

impl BinanceExchangeAdapter {
    /// Create a new Binance adapter.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        let client = BinanceHttpClient::new(config)?;

        tracing::info!(
            environment = %config.environment,
            base_url = client.base_url(),
            authenticated = !config.credentials.is_anonymous(),
            "Binance client initialized"
        );

        Ok(Self {
            client,
            environment: config.environment,
            kline_page_limit: config.kline_page_limit,
        })
    }

    /// Environment the adapter talks to.
    #[must_use]
    pub const fn environment(&self) -> BinanceEnvironment {
        self.environment
    }

    /// Fetch every kline in the query range, one page at a time.
    ///
    /// The next page starts 1 ms after the last open time received. Paging
    /// stops on a short or empty page, once the range end is passed, or when
    /// the exchange returns a page that does not move the start forward.
    async fn fetch_klines(&self, query: &KlineQuery) -> Result<Vec<Candle>, BinanceError> {
        let end_ms = query.end.timestamp_millis();
        let limit = usize::from(self.kline_page_limit);
        let mut start_ms = query.start.timestamp_millis();
        let mut candles = Vec::new();
        let mut pages = 0_u32;

        loop {
            let params = [
                ("symbol", query.symbol.as_str().to_string()),
                ("interval", query.interval.as_str().to_string()),
                ("startTime", start_ms.to_string()),
                ("endTime", end_ms.to_string()),
                ("limit", self.kline_page_limit.to_string()),
            ];
            let rows: Vec<RawKline> = self.client.get("klines", "/api/v3/klines", &params).await?;
            pages += 1;

            let Some(last_open_ms) = rows.last().map(RawKline::open_time_ms) else {
                break;
            };
            let page_len = rows.len();

            for row in rows {
                candles.push(row.into_candle()?);
            }

            let next_start_ms = last_open_ms.saturating_add(1);
            if page_len < limit || next_start_ms <= start_ms || next_start_ms > end_ms {
                break;
            }
            start_ms = next_start_ms;
        }

        tracing::debug!(
            symbol = %query.symbol,
            interval = %query.interval,
            pages,
            count = candles.len(),
            "Fetched klines from Binance"
        );

        Ok(candles)
    }
}

#[async_trait]
impl ExchangePort for BinanceExchangeAdapter {
    async fn historical_klines(&self, query: &KlineQuery) -> Result<Vec<Candle>, ExchangeError> {
        self.fetch_klines(query).await.map_err(ExchangeError::from)
    }

    async fn symbol_ticker(&self, symbol: &Symbol) -> Result<PriceQuote, ExchangeError> {
        let response: SymbolPriceResponse = self
            .client
            .get(
                "ticker_price",
                "/api/v3/ticker/price",
                &[("symbol", symbol.as_str().to_string())],
            )
            .await?;

        Ok(response.into_quote(symbol)?)
    }

    async fn ticker_24h(&self, symbol: &Symbol) -> Result<DailyStats, ExchangeError> {
        let response: Ticker24hResponse = self
            .client
            .get(
                "ticker_24hr",
                "/api/v3/ticker/24hr",
                &[("symbol", symbol.as_str().to_string())],
            )
            .await?;

        Ok(response.into_stats(symbol)?)
    }
}
