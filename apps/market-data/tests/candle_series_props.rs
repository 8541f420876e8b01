//! Property tests for candle series ordering.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use proptest::prelude::*;

use binance_market_data::{Candle, CandleSeries, KlineInterval, Symbol};

fn candle(open_ms: i64, close: f64) -> Candle {
    let open_time = DateTime::<Utc>::from_timestamp_millis(open_ms).unwrap();
    Candle {
        open_time,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1.0,
        close_time: open_time + TimeDelta::minutes(1) - TimeDelta::milliseconds(1),
        quote_volume: close,
        trade_count: 1,
        taker_buy_base_volume: 0.5,
        taker_buy_quote_volume: close / 2.0,
    }
}

proptest! {
    #[test]
    fn series_is_strictly_ascending(
        rows in prop::collection::vec((0_i64..1_000, 1.0_f64..1_000.0), 0..200)
    ) {
        let candles: Vec<Candle> = rows
            .iter()
            .map(|(minute, close)| candle(minute * 60_000, *close))
            .collect();
        let series = CandleSeries::new(
            Symbol::new("BTCUSDT").unwrap(),
            KlineInterval::OneMinute,
            candles,
        );

        prop_assert!(series
            .candles()
            .windows(2)
            .all(|pair| pair[0].open_time < pair[1].open_time));

        let distinct: BTreeSet<i64> = rows.iter().map(|(minute, _)| *minute).collect();
        prop_assert_eq!(series.len(), distinct.len());
        for minute in distinct {
            let open_time = DateTime::<Utc>::from_timestamp_millis(minute * 60_000).unwrap();
            prop_assert!(series.get(open_time).is_some());
        }
    }

    #[test]
    fn later_duplicate_wins(minute in 0_i64..1_000, first in 1.0_f64..10.0, second in 20.0_f64..30.0) {
        let series = CandleSeries::new(
            Symbol::new("ETHUSDT").unwrap(),
            KlineInterval::OneMinute,
            vec![candle(minute * 60_000, first), candle(minute * 60_000, second)],
        );

        prop_assert_eq!(series.len(), 1);
        prop_assert!((series.candles()[0].close - second).abs() < f64::EPSILON);
    }
}
