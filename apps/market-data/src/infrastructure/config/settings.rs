//! Application Settings
//!
//! Settings for the market data service, loaded from environment variables.

use std::time::Duration;

use crate::application::services::DEFAULT_LOOKBACK_DAYS;
use crate::domain::market_data::Symbol;
use crate::infrastructure::binance::{
    BinanceConfig, BinanceEnvironment, Credentials, MAX_KLINE_PAGE_LIMIT,
};

/// Trading pairs probed when `TRADING_PAIRS` is not set.
pub const DEFAULT_TRADING_PAIRS: [&str; 26] = [
    // Majors
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "ADAUSDT", "XRPUSDT", "DOGEUSDT",
    // Memes
    "PEPEUSDT", "FLOKIUSDT", "BONKUSDT", "BOMEUSDT", "WIFUSDT",
    // DeFi
    "UNIUSDT", "CAKEUSDT", "SUSHIUSDT", "COMPUSDT", "AAVEUSDT", "MKRUSDT", "YFIUSDT",
    "CRVUSDT", "SNXUSDT", "PERPUSDT", "GMXUSDT", "BALUSDT", "1INCHUSDT", "ZRXUSDT",
];

/// Default HTTP timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Binance API credentials.
    pub credentials: Credentials,
    /// Binance REST environment.
    pub environment: BinanceEnvironment,
    /// Base URL override.
    pub base_url: Option<String>,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Rows per klines page.
    pub kline_page_limit: u16,
    /// Default lookback for historical candles.
    pub lookback_days: u32,
    /// Trading universe.
    pub trading_pairs: Vec<Symbol>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BINANCE_API_KEY`, `BINANCE_API_SECRET`: optional credentials
    /// - `BINANCE_ENV`: `production` (default) or `testnet`
    /// - `BINANCE_BASE_URL`: overrides the environment's URL
    /// - `BINANCE_TIMEOUT_SECS`: HTTP timeout (default 10)
    /// - `BINANCE_KLINE_PAGE_LIMIT`: klines page size (default 1000)
    /// - `MARKET_DATA_LOOKBACK_DAYS`: default lookback (default 7)
    /// - `TRADING_PAIRS`: comma separated symbols
    ///
    /// # Errors
    ///
    /// Returns an error if the lookback is zero or a trading pair is not a
    /// valid symbol.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = var("BINANCE_API_KEY").unwrap_or_default();
        let api_secret = var("BINANCE_API_SECRET").unwrap_or_default();
        if api_key.is_empty() {
            tracing::info!("BINANCE_API_KEY not set, using public endpoints only");
        }

        let environment = var("BINANCE_ENV")
            .map(|s| BinanceEnvironment::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let timeout = var("BINANCE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let kline_page_limit = parse_or(
            var("BINANCE_KLINE_PAGE_LIMIT"),
            MAX_KLINE_PAGE_LIMIT,
        )
        .clamp(1, MAX_KLINE_PAGE_LIMIT);

        let lookback_days = parse_or(var("MARKET_DATA_LOOKBACK_DAYS"), DEFAULT_LOOKBACK_DAYS);
        if lookback_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MARKET_DATA_LOOKBACK_DAYS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let trading_pairs = match var("TRADING_PAIRS") {
            Some(raw) => parse_pairs(raw.split(','))?,
            None => parse_pairs(DEFAULT_TRADING_PAIRS)?,
        };

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
            environment,
            base_url: var("BINANCE_BASE_URL"),
            timeout,
            kline_page_limit,
            lookback_days,
            trading_pairs,
        })
    }

    /// Binance adapter configuration.
    #[must_use]
    pub fn binance_config(&self) -> BinanceConfig {
        let config = BinanceConfig::new(self.credentials.clone(), self.environment)
            .with_timeout(self.timeout)
            .with_kline_page_limit(self.kline_page_limit);

        match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable has a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// What is wrong with it.
        message: String,
    },
    /// A trading pair is not a valid symbol.
    #[error("invalid trading pair {value:?} in TRADING_PAIRS")]
    InvalidSymbol {
        /// Raw entry.
        value: String,
    },
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_pairs<'a>(raw: impl IntoIterator<Item = &'a str>) -> Result<Vec<Symbol>, ConfigError> {
    let mut pairs: Vec<Symbol> = Vec::new();
    for entry in raw.into_iter().map(str::trim).filter(|s| !s.is_empty()) {
        let symbol = Symbol::new(entry).map_err(|_| ConfigError::InvalidSymbol {
            value: entry.to_string(),
        })?;
        if !pairs.contains(&symbol) {
            pairs.push(symbol);
        }
    }
    Ok(pairs)
}
