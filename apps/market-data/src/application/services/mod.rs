//! Application Services
//!
//! The market data facade and its result types.

mod market_data_facade;

pub use market_data_facade::{
    DEFAULT_LOOKBACK_DAYS, MarketDataError, MarketDataFacade, PairAvailabilityReport,
    UnavailablePair,
};
