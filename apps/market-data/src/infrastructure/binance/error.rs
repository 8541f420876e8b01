//! Binance-specific error types.

use thiserror::Error;

use crate::application::ports::ExchangeError;

/// Errors from the Binance adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinanceError {
    /// HTTP client could not be built or the request could not be formed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Network error (connect, timeout, TLS, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error payload.
    #[error("API error (HTTP {status}): {code} - {message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Binance error code, e.g. `-1121`.
        code: i64,
        /// Binance error message.
        message: String,
    },

    /// API key rejected (HTTP 401/403).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request weight exceeded (HTTP 429).
    #[error("Rate limited")]
    RateLimited {
        /// `Retry-After` header, when present.
        retry_after_secs: Option<u64>,
    },

    /// IP auto-banned after ignoring 429s (HTTP 418).
    #[error("IP banned by exchange")]
    IpBanned {
        /// `Retry-After` header, when present.
        retry_after_secs: Option<u64>,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// A numeric field was not a valid number.
    #[error("Invalid number in field '{field}': {value:?}")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// A timestamp was outside the representable range.
    #[error("Invalid timestamp in field '{field}': {value}")]
    InvalidTimestamp {
        /// Field name.
        field: &'static str,
        /// Raw milliseconds.
        value: i64,
    },
}

impl From<BinanceError> for ExchangeError {
    fn from(err: BinanceError) -> Self {
        match err {
            BinanceError::Http(message) | BinanceError::Network(message) => {
                Self::Connection { message }
            }
            BinanceError::Api {
                status,
                code,
                message,
            } => Self::Api {
                status,
                code,
                message,
            },
            BinanceError::AuthenticationFailed(message) => Self::Authentication { message },
            BinanceError::RateLimited { retry_after_secs }
            | BinanceError::IpBanned { retry_after_secs } => Self::RateLimited { retry_after_secs },
            err @ (BinanceError::JsonParse(_)
            | BinanceError::InvalidNumber { .. }
            | BinanceError::InvalidTimestamp { .. }) => Self::InvalidResponse {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_maps_to_connection() {
        let err: ExchangeError = BinanceError::Network("connection refused".to_string()).into();
        assert!(matches!(err, ExchangeError::Connection { .. }));
    }

    #[test]
    fn api_keeps_code() {
        let err: ExchangeError = BinanceError::Api {
            status: 400,
            code: -1121,
            message: "Invalid symbol.".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ExchangeError::Api {
                status: 400,
                code: -1121,
                message: "Invalid symbol.".to_string(),
            }
        );
    }

    #[test]
    fn auth_maps_to_authentication() {
        let err: ExchangeError = BinanceError::AuthenticationFailed("bad key".to_string()).into();
        assert!(matches!(err, ExchangeError::Authentication { .. }));
    }

    #[test]
    fn ban_maps_to_rate_limited() {
        let err: ExchangeError = BinanceError::IpBanned {
            retry_after_secs: Some(120),
        }
        .into();
        assert_eq!(
            err,
            ExchangeError::RateLimited {
                retry_after_secs: Some(120)
            }
        );
    }

    #[test]
    fn decode_errors_map_to_invalid_response() {
        let err: ExchangeError = BinanceError::InvalidNumber {
            field: "price",
            value: "abc".to_string(),
        }
        .into();
        match err {
            ExchangeError::InvalidResponse { message } => assert!(message.contains("price")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
