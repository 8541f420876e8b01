//! Agent Tools
//!
//! Named, JSON-in/JSON-out wrappers over the market data facade, in the
//! shape trading agents call them. Tools never fail loudly: bad arguments or
//! failed fetches are logged and yield `None`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::application::ports::ExchangePort;
use crate::application::services::MarketDataFacade;
use crate::domain::market_data::{KlineInterval, Symbol};
use crate::infrastructure::metrics;

/// Interval used by the klines tool when none is given.
pub const DEFAULT_TOOL_INTERVAL: KlineInterval = KlineInterval::OneHour;

/// Lookback used by the klines tool when none is given.
pub const DEFAULT_TOOL_LOOKBACK_DAYS: u32 = 30;

/// Tools exposed to agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketDataTool {
    /// Historical candlestick table.
    HistoricalKlines,
    /// Current price.
    CurrentPrice,
    /// 24-hour statistics.
    Stats24h,
}

impl MarketDataTool {
    /// Every tool, in registration order.
    pub const ALL: [Self; 3] = [Self::HistoricalKlines, Self::CurrentPrice, Self::Stats24h];

    /// Display name agents refer to the tool by.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HistoricalKlines => "Get Historical Klines",
            Self::CurrentPrice => "Get Current Price",
            Self::Stats24h => "Get 24h Statistics",
        }
    }

    /// One-line description handed to the agent.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::HistoricalKlines => {
                "Get historical candlestick data for a cryptocurrency symbol"
            }
            Self::CurrentPrice => "Get the current price for a cryptocurrency symbol",
            Self::Stats24h => "Get 24-hour trading statistics for a cryptocurrency symbol",
        }
    }

    /// Look a tool up by its display name (case insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(name))
    }
}

/// Arguments accepted by every tool. Only the klines tool reads
/// `interval` and `lookback_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolArguments {
    /// Trading pair, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Kline interval, e.g. `1h`.
    #[serde(default)]
    pub interval: Option<String>,
    /// Days of history to fetch.
    #[serde(default)]
    pub lookback_days: Option<u32>,
}

/// Agents may pass either a bare symbol string or an argument object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawArguments {
    Symbol(String),
    Full(ToolArguments),
}

impl From<RawArguments> for ToolArguments {
    fn from(raw: RawArguments) -> Self {
        match raw {
            RawArguments::Symbol(symbol) => Self {
                symbol,
                interval: None,
                lookback_days: None,
            },
            RawArguments::Full(arguments) => arguments,
        }
    }
}

/// Runs [`MarketDataTool`]s against a shared facade.
#[derive(Debug)]
pub struct MarketDataToolbox<E> {
    facade: Arc<MarketDataFacade<E>>,
}

impl<E> Clone for MarketDataToolbox<E> {
    fn clone(&self) -> Self {
        Self {
            facade: Arc::clone(&self.facade),
        }
    }
}

impl<E: ExchangePort> MarketDataToolbox<E> {
    /// Create a toolbox over a shared facade.
    #[must_use]
    pub const fn new(facade: Arc<MarketDataFacade<E>>) -> Self {
        Self { facade }
    }

    /// Name and description of every tool, as a JSON array.
    #[must_use]
    pub fn describe() -> Value {
        Value::Array(
            MarketDataTool::ALL
                .into_iter()
                .map(|tool| json!({ "name": tool.name(), "description": tool.description() }))
                .collect(),
        )
    }

    /// Run a tool identified by display name.
    pub async fn run_by_name(&self, name: &str, arguments: &Value) -> Option<Value> {
        let Some(tool) = MarketDataTool::from_name(name) else {
            tracing::warn!(tool = name, "Unknown market data tool");
            return None;
        };
        self.run(tool, arguments).await
    }

    /// Run a tool with JSON arguments.
    pub async fn run(&self, tool: MarketDataTool, arguments: &Value) -> Option<Value> {
        let arguments = match serde_json::from_value::<RawArguments>(arguments.clone()) {
            Ok(raw) => ToolArguments::from(raw),
            Err(e) => {
                tracing::warn!(tool = tool.name(), error = %e, "Invalid tool arguments");
                return None;
            }
        };

        let symbol = match Symbol::new(&arguments.symbol) {
            Ok(symbol) => symbol,
            Err(e) => {
                tracing::warn!(tool = tool.name(), error = %e, "Invalid tool symbol");
                return None;
            }
        };

        match tool {
            MarketDataTool::HistoricalKlines => self.historical_klines(&symbol, &arguments).await,
            MarketDataTool::CurrentPrice => self
                .facade
                .fetch_current_price(&symbol)
                .await
                .map(Value::from),
            MarketDataTool::Stats24h => self.facade.fetch_daily_stats(&symbol).await.map(|stats| {
                json!({
                    "price_change": stats.price_change,
                    "price_change_percent": stats.price_change_percent,
                    "volume": stats.volume,
                    "quote_volume": stats.quote_volume,
                })
            }),
        }
    }

    async fn historical_klines(&self, symbol: &Symbol, arguments: &ToolArguments) -> Option<Value> {
        let interval = match arguments.interval.as_deref() {
            Some(raw) => match raw.parse::<KlineInterval>() {
                Ok(interval) => interval,
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid tool interval");
                    return None;
                }
            },
            None => DEFAULT_TOOL_INTERVAL,
        };
        let lookback_days = arguments
            .lookback_days
            .unwrap_or(DEFAULT_TOOL_LOOKBACK_DAYS);

        // A successful fetch with no rows is an empty table, not `None`.
        match self
            .facade
            .try_fetch_historical_candles(symbol, interval, lookback_days)
            .await
        {
            Ok(series) => Some(series.to_table()),
            Err(e) => {
                tracing::error!(
                    tool = MarketDataTool::HistoricalKlines.name(),
                    symbol = %symbol,
                    error = %e,
                    "Error fetching historical data"
                );
                metrics::record_fetch_failure("historical_klines_tool");
                None
            }
        }
    }
}
