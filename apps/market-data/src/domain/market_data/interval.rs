//! Kline interval enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Candle granularity supported by the Binance spot API.
///
/// Parsing is case sensitive: `1m` is one minute, `1M` is one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    /// 1 second.
    #[serde(rename = "1s")]
    OneSecond,
    /// 1 minute.
    #[serde(rename = "1m")]
    OneMinute,
    /// 3 minutes.
    #[serde(rename = "3m")]
    ThreeMinutes,
    /// 5 minutes.
    #[serde(rename = "5m")]
    FiveMinutes,
    /// 15 minutes.
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// 30 minutes.
    #[serde(rename = "30m")]
    ThirtyMinutes,
    /// 1 hour.
    #[serde(rename = "1h")]
    OneHour,
    /// 2 hours.
    #[serde(rename = "2h")]
    TwoHours,
    /// 4 hours.
    #[serde(rename = "4h")]
    FourHours,
    /// 6 hours.
    #[serde(rename = "6h")]
    SixHours,
    /// 8 hours.
    #[serde(rename = "8h")]
    EightHours,
    /// 12 hours.
    #[serde(rename = "12h")]
    TwelveHours,
    /// 1 day.
    #[serde(rename = "1d")]
    OneDay,
    /// 3 days.
    #[serde(rename = "3d")]
    ThreeDays,
    /// 1 week.
    #[serde(rename = "1w")]
    OneWeek,
    /// 1 calendar month.
    #[serde(rename = "1M")]
    OneMonth,
}

impl KlineInterval {
    /// Every supported interval, shortest first.
    pub const ALL: [Self; 16] = [
        Self::OneSecond,
        Self::OneMinute,
        Self::ThreeMinutes,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::FourHours,
        Self::SixHours,
        Self::EightHours,
        Self::TwelveHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
        Self::OneMonth,
    ];

    /// Wire representation used by the exchange.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneSecond => "1s",
            Self::OneMinute => "1m",
            Self::ThreeMinutes => "3m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::TwoHours => "2h",
            Self::FourHours => "4h",
            Self::SixHours => "6h",
            Self::EightHours => "8h",
            Self::TwelveHours => "12h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1M",
        }
    }
}

impl fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KlineInterval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == trimmed)
            .ok_or_else(|| {
                DomainError::invalid(
                    "interval",
                    format!("'{trimmed}' is not a supported kline interval"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("1s", KlineInterval::OneSecond)]
    #[test_case("1m", KlineInterval::OneMinute)]
    #[test_case("15m", KlineInterval::FifteenMinutes)]
    #[test_case("1h", KlineInterval::OneHour)]
    #[test_case("4h", KlineInterval::FourHours)]
    #[test_case("1d", KlineInterval::OneDay)]
    #[test_case("1w", KlineInterval::OneWeek)]
    #[test_case("1M", KlineInterval::OneMonth)]
    fn parses_exchange_strings(input: &str, expected: KlineInterval) {
        assert_eq!(input.parse::<KlineInterval>().unwrap(), expected);
    }

    #[test_case("")]
    #[test_case("2m")]
    #[test_case("1H")]
    #[test_case("daily")]
    fn rejects_unsupported(input: &str) {
        assert!(input.parse::<KlineInterval>().is_err());
    }

    #[test]
    fn display_round_trips_every_variant() {
        for interval in KlineInterval::ALL {
            let parsed: KlineInterval = interval.to_string().parse().unwrap();
            assert_eq!(parsed, interval);
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&KlineInterval::OneMonth).unwrap(),
            "\"1M\""
        );
        let parsed: KlineInterval = serde_json::from_str("\"1m\"").unwrap();
        assert_eq!(parsed, KlineInterval::OneMinute);
    }
}
