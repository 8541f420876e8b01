//! Binance API response types.
//!
//! These types map directly to Binance's spot REST API format. Prices and
//! volumes arrive as decimal strings and are parsed into `f64` here.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;

use super::error::BinanceError;
use crate::domain::market_data::{Candle, DailyStats, PriceQuote, Symbol};

// ============================================================================
// Klines
// ============================================================================

/// One row of `GET /api/v3/klines`.
///
/// `[open_time, open, high, low, close, volume, close_time, quote_volume,
/// trades, taker_buy_base, taker_buy_quote, ignore]`
#[derive(Debug, Clone, Deserialize)]
pub struct RawKline(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    pub String,
    pub u64,
    pub String,
    pub String,
    pub IgnoredAny,
);

impl RawKline {
    /// Open time in epoch milliseconds.
    #[must_use]
    pub const fn open_time_ms(&self) -> i64 {
        self.0
    }

    /// Convert to a domain candle.
    pub fn into_candle(self) -> Result<Candle, BinanceError> {
        Ok(Candle {
            open_time: parse_millis("open_time", self.0)?,
            open: parse_number("open", &self.1)?,
            high: parse_number("high", &self.2)?,
            low: parse_number("low", &self.3)?,
            close: parse_number("close", &self.4)?,
            volume: parse_number("volume", &self.5)?,
            close_time: parse_millis("close_time", self.6)?,
            quote_volume: parse_number("quote_asset_volume", &self.7)?,
            trade_count: self.8,
            taker_buy_base_volume: parse_number("taker_buy_base_asset_volume", &self.9)?,
            taker_buy_quote_volume: parse_number("taker_buy_quote_asset_volume", &self.10)?,
        })
    }
}

// ============================================================================
// Tickers
// ============================================================================

/// Response of `GET /api/v3/ticker/price`.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct SymbolPriceResponse {
    /// Symbol.
    pub symbol: String,
    /// Latest price (as string).
    pub price: String,
}

impl SymbolPriceResponse {
    /// Convert to a domain quote for the requested symbol.
    pub fn into_quote(self, symbol: &Symbol) -> Result<PriceQuote, BinanceError> {
        Ok(PriceQuote::new(
            symbol.clone(),
            parse_number("price", &self.price)?,
        ))
    }
}

/// Response of `GET /api/v3/ticker/24hr`.
///
/// Only the fields the facade reports are decoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct Ticker24hResponse {
    /// Symbol.
    pub symbol: String,
    /// Absolute price change over 24h.
    pub price_change: String,
    /// Percentage price change over 24h.
    pub price_change_percent: String,
    /// Base asset volume over 24h.
    pub volume: String,
    /// Quote asset volume over 24h.
    pub quote_volume: String,
}

impl Ticker24hResponse {
    /// Convert to domain statistics for the requested symbol.
    pub fn into_stats(self, symbol: &Symbol) -> Result<DailyStats, BinanceError> {
        Ok(DailyStats {
            symbol: symbol.clone(),
            price_change: parse_number("priceChange", &self.price_change)?,
            price_change_percent: parse_number("priceChangePercent", &self.price_change_percent)?,
            volume: parse_number("volume", &self.volume)?,
            quote_volume: parse_number("quoteVolume", &self.quote_volume)?,
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error payload: `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorResponse {
    /// Binance error code.
    pub code: i64,
    /// Error message.
    pub msg: String,
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_number(field: &'static str, raw: &str) -> Result<f64, BinanceError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| BinanceError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_millis(field: &'static str, millis: i64) -> Result<DateTime<Utc>, BinanceError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or(BinanceError::InvalidTimestamp { field, value: millis })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KLINE_ROW: &str = r#"[
        1499040000000, "0.01634790", "0.80000000", "0.01575800", "0.01577100",
        "148976.11427815", 1499644799999, "2434.19055334", 308,
        "1756.87402397", "28.46694368", "0"
    ]"#;

    #[test]
    fn kline_row_decodes() {
        let raw: RawKline = serde_json::from_str(KLINE_ROW).unwrap();
        assert_eq!(raw.open_time_ms(), 1_499_040_000_000);

        let candle = raw.into_candle().unwrap();
        assert_eq!(candle.open_time.timestamp_millis(), 1_499_040_000_000);
        assert_eq!(candle.close_time.timestamp_millis(), 1_499_644_799_999);
        assert_eq!(candle.open, 0.016_347_9);
        assert_eq!(candle.high, 0.8);
        assert_eq!(candle.trade_count, 308);
        assert_eq!(candle.taker_buy_quote_volume, 28.466_943_68);
    }

    #[test]
    fn kline_row_with_bad_number_fails() {
        let row = KLINE_ROW.replace("\"0.80000000\"", "\"n/a\"");
        let raw: RawKline = serde_json::from_str(&row).unwrap();

        let err = raw.into_candle().unwrap_err();
        assert!(matches!(err, BinanceError::InvalidNumber { field: "high", .. }));
    }

    #[test]
    fn kline_row_with_missing_columns_is_rejected() {
        let result: Result<RawKline, _> = serde_json::from_str(r#"[1499040000000, "1.0"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn price_response_decodes() {
        let json = r#"{"symbol":"BTCUSDT","price":"65000.12000000"}"#;
        let response: SymbolPriceResponse = serde_json::from_str(json).unwrap();
        let symbol = Symbol::new("BTCUSDT").unwrap();

        let quote = response.into_quote(&symbol).unwrap();
        assert_eq!(quote.price, 65_000.12);
        assert_eq!(quote.symbol, symbol);
    }

    #[test]
    fn ticker_24h_decodes_and_ignores_extra_fields() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "priceChange": "-94.99999800",
            "priceChangePercent": "-95.960",
            "weightedAvgPrice": "0.29628482",
            "lastPrice": "4.00000200",
            "volume": "8913.30000000",
            "quoteVolume": "15.30000000",
            "count": 76
        }"#;
        let response: Ticker24hResponse = serde_json::from_str(json).unwrap();
        let stats = response
            .into_stats(&Symbol::new("BTCUSDT").unwrap())
            .unwrap();

        assert_eq!(stats.price_change, -94.999_998);
        assert_eq!(stats.price_change_percent, -95.96);
        assert_eq!(stats.volume, 8_913.3);
        assert_eq!(stats.quote_volume, 15.3);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(parse_number("price", "NaN").is_err());
        assert!(parse_number("price", "inf").is_err());
        assert_eq!(parse_number("price", " 1.5 ").unwrap(), 1.5);
    }

    #[test]
    fn error_payload_decodes() {
        let json = r#"{"code":-1121,"msg":"Invalid symbol."}"#;
        let err: BinanceErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.code, -1121);
        assert_eq!(err.msg, "Invalid symbol.");
    }
}
