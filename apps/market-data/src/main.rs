//! Market Data CLI
//!
//! Queries the Binance spot REST API and prints JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin market-data -- klines --symbol BTCUSDT --interval 1d --lookback-days 7
//! cargo run --bin market-data -- price --symbol BTCUSDT
//! cargo run --bin market-data -- stats --symbol ETHUSDT
//! cargo run --bin market-data -- pairs BTCUSDT PEPEUSDT
//! cargo run --bin market-data -- tools
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BINANCE_API_KEY`, `BINANCE_API_SECRET`: API credentials
//! - `BINANCE_ENV`: production | testnet (default: production)
//! - `BINANCE_BASE_URL`: Override the REST base URL
//! - `BINANCE_TIMEOUT_SECS`: HTTP timeout (default: 10)
//! - `BINANCE_KLINE_PAGE_LIMIT`: Klines page size (default: 1000)
//! - `MARKET_DATA_LOOKBACK_DAYS`: Default lookback (default: 7)
//! - `TRADING_PAIRS`: Comma separated universe for `pairs`
//! - `RUST_LOG`: Log level (default: binance_market_data=info)

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use binance_market_data::application::tools::MarketDataToolbox;
use binance_market_data::infrastructure::metrics;
use binance_market_data::telemetry::init_tracing;
use binance_market_data::{
    AppConfig, BinanceExchangeAdapter, KlineInterval, MarketDataFacade, Symbol,
};

#[derive(Parser)]
#[command(
    name = "market-data",
    version,
    about = "Binance market data for trading agents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Historical candles over a lookback window.
    Klines {
        /// Trading pair, e.g. BTCUSDT.
        #[arg(long)]
        symbol: Symbol,
        /// Kline interval, e.g. 1m, 1h, 1d.
        #[arg(long, default_value = "1h")]
        interval: KlineInterval,
        /// Days of history (default: MARKET_DATA_LOOKBACK_DAYS).
        #[arg(long)]
        lookback_days: Option<u32>,
    },
    /// Latest price.
    Price {
        /// Trading pair, e.g. BTCUSDT.
        #[arg(long)]
        symbol: Symbol,
    },
    /// Trailing 24h statistics.
    Stats {
        /// Trading pair, e.g. BTCUSDT.
        #[arg(long)]
        symbol: Symbol,
    },
    /// Check which trading pairs the exchange serves.
    Pairs {
        /// Pairs to check (default: TRADING_PAIRS).
        symbols: Vec<Symbol>,
    },
    /// List agent tools.
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = dotenvy::dotenv().ok();
    init_tracing();
    metrics::register_metrics();
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Klines {
            symbol,
            interval,
            lookback_days,
        } => {
            let (config, facade) = connect()?;
            let series = facade
                .try_fetch_historical_candles(
                    &symbol,
                    interval,
                    lookback_days.unwrap_or(config.lookback_days),
                )
                .await?;
            print_json(&series)
        }
        Command::Price { symbol } => {
            let (_, facade) = connect()?;
            print_json(&facade.try_fetch_current_price(&symbol).await?)
        }
        Command::Stats { symbol } => {
            let (_, facade) = connect()?;
            print_json(&facade.try_fetch_daily_stats(&symbol).await?)
        }
        Command::Pairs { symbols } => {
            let (config, facade) = connect()?;
            let symbols = if symbols.is_empty() {
                config.trading_pairs
            } else {
                symbols
            };
            let report = facade.check_pair_availability(&symbols).await;
            tracing::info!(
                available = report.available.len(),
                unavailable = report.unavailable.len(),
                "Pair availability check complete"
            );
            print_json(&report)
        }
        Command::Tools => print_json(&MarketDataToolbox::<BinanceExchangeAdapter>::describe()),
    }
}

/// Load settings and build a facade over the Binance adapter.
fn connect() -> anyhow::Result<(AppConfig, MarketDataFacade<BinanceExchangeAdapter>)> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let adapter = BinanceExchangeAdapter::new(&config.binance_config())
        .context("Failed to create Binance client")?;
    Ok((config, MarketDataFacade::new(adapter)))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
