//! Market Data Value Objects
//!
//! Normalized shapes for exchange responses. Prices and volumes are `f64`,
//! instants are `DateTime<Utc>`.

mod candle;
mod interval;
mod symbol;
mod ticker;

pub use candle::{CANDLE_COLUMNS, Candle, CandleSeries};
pub use interval::KlineInterval;
pub use symbol::Symbol;
pub use ticker::{DailyStats, PriceQuote};
