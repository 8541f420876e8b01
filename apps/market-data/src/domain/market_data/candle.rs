//! Candle (kline) and ordered candle series.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{KlineInterval, Symbol};

/// Column names of the tabular candle view, in display order.
pub const CANDLE_COLUMNS: [&str; 10] = [
    "open",
    "high",
    "low",
    "close",
    "volume",
    "close_time",
    "quote_asset_volume",
    "number_of_trades",
    "taker_buy_base_asset_volume",
    "taker_buy_quote_asset_volume",
];

/// Fixed-interval aggregate of trade activity for one trading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time.
    pub open_time: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Base asset volume.
    pub volume: f64,
    /// Candle close time.
    pub close_time: DateTime<Utc>,
    /// Quote asset volume.
    pub quote_volume: f64,
    /// Number of trades in the candle.
    pub trade_count: u64,
    /// Taker buy base asset volume.
    pub taker_buy_base_volume: f64,
    /// Taker buy quote asset volume.
    pub taker_buy_quote_volume: f64,
}

impl Candle {
    /// Sanity check on exchange data: high >= max(open, close) and
    /// low <= min(open, close). Not enforced anywhere.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
            && self.low <= self.high
    }

    fn column_value(&self, column: &str) -> Value {
        match column {
            "open" => Value::from(self.open),
            "high" => Value::from(self.high),
            "low" => Value::from(self.low),
            "close" => Value::from(self.close),
            "volume" => Value::from(self.volume),
            "close_time" => Value::from(format_instant(self.close_time)),
            "quote_asset_volume" => Value::from(self.quote_volume),
            "number_of_trades" => Value::from(self.trade_count),
            "taker_buy_base_asset_volume" => Value::from(self.taker_buy_base_volume),
            "taker_buy_quote_asset_volume" => Value::from(self.taker_buy_quote_volume),
            _ => Value::Null,
        }
    }
}

/// Candles for one symbol and interval, indexed by open time.
///
/// Invariant: strictly ascending open times, no duplicates. Deserialized
/// series go through [`CandleSeries::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandleSeriesRepr")]
pub struct CandleSeries {
    symbol: Symbol,
    interval: KlineInterval,
    candles: Vec<Candle>,
}

/// Wire shape of a series, before ordering is restored.
#[derive(Deserialize)]
struct CandleSeriesRepr {
    symbol: Symbol,
    interval: KlineInterval,
    candles: Vec<Candle>,
}

impl From<CandleSeriesRepr> for CandleSeries {
    fn from(repr: CandleSeriesRepr) -> Self {
        Self::new(repr.symbol, repr.interval, repr.candles)
    }
}

impl CandleSeries {
    /// Build a series from candles in any order.
    ///
    /// Candles are sorted by open time. When two candles share an open time
    /// the one that appears later in the input wins.
    #[must_use]
    pub fn new(symbol: Symbol, interval: KlineInterval, candles: Vec<Candle>) -> Self {
        let indexed: BTreeMap<DateTime<Utc>, Candle> = candles
            .into_iter()
            .map(|candle| (candle.open_time, candle))
            .collect();

        Self {
            symbol,
            interval,
            candles: indexed.into_values().collect(),
        }
    }

    /// An empty series.
    #[must_use]
    pub const fn empty(symbol: Symbol, interval: KlineInterval) -> Self {
        Self {
            symbol,
            interval,
            candles: Vec::new(),
        }
    }

    /// Trading pair of the series.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Interval of the series.
    #[must_use]
    pub const fn interval(&self) -> KlineInterval {
        self.interval
    }

    /// Candles, oldest first.
    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Consume the series and return its candles, oldest first.
    #[must_use]
    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }

    /// Number of candles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// True when the series holds no candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Iterate candles, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// Oldest candle.
    #[must_use]
    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    /// Most recent candle.
    #[must_use]
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Look up the candle that opened at `open_time`.
    #[must_use]
    pub fn get(&self, open_time: DateTime<Utc>) -> Option<&Candle> {
        self.candles
            .binary_search_by_key(&open_time, |candle| candle.open_time)
            .ok()
            .map(|index| &self.candles[index])
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|candle| candle.close).collect()
    }

    /// Column-oriented view: `{column: {open_time: value}}`.
    ///
    /// Open times are RFC 3339 strings with millisecond precision, so keys
    /// sort chronologically.
    #[must_use]
    pub fn to_table(&self) -> Value {
        let mut table = Map::new();
        for column in CANDLE_COLUMNS {
            let cells: Map<String, Value> = self
                .candles
                .iter()
                .map(|candle| (format_instant(candle.open_time), candle.column_value(column)))
                .collect();
            table.insert(column.to_string(), Value::Object(cells));
        }
        Value::Object(table)
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
