// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Binance Market Data - Rust Core Library
//!
//! Read-only market data for trading agents: historical candles, current
//! prices and 24h statistics from the Binance spot REST API.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Market data value types
//!   - `market_data`: `Symbol`, `KlineInterval`, `Candle`, `CandleSeries`,
//!     `PriceQuote`, `DailyStats`
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: `ExchangePort`, the driven port to the exchange
//!   - `services`: `MarketDataFacade` with typed and fail-soft reads
//!   - `tools`: named JSON tools for agents
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `binance`: Binance REST adapter
//!   - `mock`: In-memory exchange
//!   - `config`: Environment settings
//!   - `metrics`: Request and failure counters
//!
//! # Failure policy
//!
//! `fetch_*` operations never return errors. Failures are logged and the
//! caller receives an empty series or `None`. Use the `try_*` operations
//! to inspect the failure.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Hexagonal Layers
// =============================================================================

/// Domain layer - Market data types with no I/O.
pub mod domain;

/// Application layer - Facade, tools and port definitions.
pub mod application;

/// Infrastructure layer - Exchange adapters, config and metrics.
pub mod infrastructure;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{ExchangeError, ExchangePort, KlineQuery};
pub use application::services::{
    DEFAULT_LOOKBACK_DAYS, MarketDataError, MarketDataFacade, PairAvailabilityReport,
};
pub use application::tools::{MarketDataTool, MarketDataToolbox};
pub use domain::DomainError;
pub use domain::market_data::{
    Candle, CandleSeries, DailyStats, KlineInterval, PriceQuote, Symbol,
};
pub use infrastructure::binance::{BinanceConfig, BinanceExchangeAdapter};
pub use infrastructure::config::AppConfig;
