//! HTTP client wrapper for the Binance REST API.
//!
//! One request per call. Failures are categorized by status and returned
//! to the caller; nothing is retried here.

use std::time::Instant;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::api_types::BinanceErrorResponse;
use super::config::BinanceConfig;
use super::error::BinanceError;
use crate::infrastructure::metrics;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client for the Binance REST API.
#[derive(Debug, Clone)]
pub struct BinanceHttpClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl BinanceHttpClient {
    /// Create a new HTTP client from config.
    ///
    /// Missing credentials are not an error; public endpoints are called
    /// without the key header.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinanceError::Http(e.to_string()))?;

        let api_key = (!config.credentials.is_anonymous())
            .then(|| config.credentials.api_key().to_string());

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url().to_string(),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request.
    ///
    /// `endpoint` is a short static label used for logs and metrics.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BinanceError> {
        let url = format!("{}{path}", self.base_url);
        let started = Instant::now();

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                metrics::record_exchange_request(endpoint, "network_error", started.elapsed());
                tracing::warn!(endpoint, error = %e, "Binance request failed");
                return Err(BinanceError::Network(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            metrics::record_exchange_request(endpoint, "http_error", started.elapsed());
            return Err(error_from_response(response).await);
        }

        let text = response.text().await.map_err(|e| {
            metrics::record_exchange_request(endpoint, "network_error", started.elapsed());
            BinanceError::Network(e.to_string())
        })?;

        let parsed = serde_json::from_str(&text).map_err(|e| BinanceError::JsonParse(e.to_string()));
        let outcome = if parsed.is_ok() {
            "success"
        } else {
            "decode_error"
        };
        metrics::record_exchange_request(endpoint, outcome, started.elapsed());

        tracing::debug!(
            endpoint,
            status = status.as_u16(),
            bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Binance request completed"
        );

        parsed
    }
}

/// Error category of a non-success status.
#[derive(Debug, PartialEq, Eq)]
enum ErrorCategory {
    Authentication,
    RateLimited,
    IpBanned,
    Rejected,
}

/// Categorize a non-success HTTP status.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        401 | 403 => ErrorCategory::Authentication,
        429 => ErrorCategory::RateLimited,
        418 => ErrorCategory::IpBanned,
        _ => ErrorCategory::Rejected,
    }
}

async fn error_from_response(response: Response) -> BinanceError {
    let status = response.status();
    let retry_after_secs = response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let error_body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<BinanceErrorResponse>(&error_body) {
        Ok(err) => (err.code, err.msg),
        Err(_) => (0, error_body),
    };

    tracing::warn!(
        status = status.as_u16(),
        code,
        message = %message,
        retry_after_secs,
        "Binance returned an error"
    );

    match categorize_status(status) {
        ErrorCategory::Authentication => BinanceError::AuthenticationFailed(message),
        ErrorCategory::RateLimited => BinanceError::RateLimited { retry_after_secs },
        ErrorCategory::IpBanned => BinanceError::IpBanned { retry_after_secs },
        ErrorCategory::Rejected => BinanceError::Api {
            status: status.as_u16(),
            code,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::binance::{BinanceEnvironment, Credentials};

    #[test]
    fn categorize_authentication() {
        assert_eq!(
            categorize_status(StatusCode::UNAUTHORIZED),
            ErrorCategory::Authentication
        );
        assert_eq!(
            categorize_status(StatusCode::FORBIDDEN),
            ErrorCategory::Authentication
        );
    }

    #[test]
    fn categorize_rate_limits() {
        assert_eq!(
            categorize_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorCategory::RateLimited
        );
        assert_eq!(
            categorize_status(StatusCode::IM_A_TEAPOT),
            ErrorCategory::IpBanned
        );
    }

    #[test]
    fn categorize_rejected() {
        assert_eq!(
            categorize_status(StatusCode::BAD_REQUEST),
            ErrorCategory::Rejected
        );
        assert_eq!(
            categorize_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorCategory::Rejected
        );
    }

    #[test]
    fn anonymous_client_sends_no_key() {
        let config = BinanceConfig::new(Credentials::default(), BinanceEnvironment::Testnet);
        let client = BinanceHttpClient::new(&config).unwrap();
        assert!(client.api_key.is_none());
        assert_eq!(client.base_url(), "https://testnet.binance.vision");
    }

    #[test]
    fn keyed_client_keeps_key() {
        let config = BinanceConfig::new(
            Credentials::new("key".to_string(), "secret".to_string()),
            BinanceEnvironment::Production,
        );
        let client = BinanceHttpClient::new(&config).unwrap();
        assert_eq!(client.api_key.as_deref(), Some("key"));
    }
}
