//! Binance adapter configuration.

use std::time::Duration;

/// Largest page the klines endpoint serves.
pub const MAX_KLINE_PAGE_LIMIT: u16 = 1000;

/// Binance REST environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinanceEnvironment {
    /// Production spot API.
    #[default]
    Production,
    /// Spot testnet.
    Testnet,
}

impl BinanceEnvironment {
    /// Parse environment from string. Anything but `testnet` is production.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "testnet" | "test" => Self::Testnet,
            _ => Self::Production,
        }
    }

    /// Base URL of the REST API.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.binance.com",
            Self::Testnet => "https://testnet.binance.vision",
        }
    }

    /// Environment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Testnet => "testnet",
        }
    }
}

impl std::fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binance API credentials.
///
/// Market data endpoints are public, so both values may be empty.
#[derive(Clone, Default)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// True when no API key is configured.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.api_key.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the Binance adapter.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// REST environment.
    pub environment: BinanceEnvironment,
    /// Overrides the environment's base URL (proxies, local mocks).
    pub base_url_override: Option<String>,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Rows requested per klines page, `1..=1000`.
    pub kline_page_limit: u16,
}

impl BinanceConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(credentials: Credentials, environment: BinanceEnvironment) -> Self {
        Self {
            credentials,
            environment,
            base_url_override: None,
            timeout: Duration::from_secs(10),
            kline_page_limit: MAX_KLINE_PAGE_LIMIT,
        }
    }

    /// Point the adapter at a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the klines page size, clamped to `1..=1000`.
    #[must_use]
    pub fn with_kline_page_limit(mut self, limit: u16) -> Self {
        self.kline_page_limit = limit.clamp(1, MAX_KLINE_PAGE_LIMIT);
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BinanceConfig {
        BinanceConfig::new(
            Credentials::new("key".to_string(), "secret".to_string()),
            BinanceEnvironment::Production,
        )
    }

    #[test]
    fn environment_parsing() {
        assert_eq!(
            BinanceEnvironment::from_str_case_insensitive("TESTNET"),
            BinanceEnvironment::Testnet
        );
        assert_eq!(
            BinanceEnvironment::from_str_case_insensitive("production"),
            BinanceEnvironment::Production
        );
        assert_eq!(
            BinanceEnvironment::from_str_case_insensitive("unknown"),
            BinanceEnvironment::Production
        );
    }

    #[test]
    fn environment_urls() {
        assert_eq!(
            BinanceEnvironment::Production.base_url(),
            "https://api.binance.com"
        );
        assert!(BinanceEnvironment::Testnet.base_url().contains("testnet"));
    }

    #[test]
    fn config_defaults() {
        let config = config();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.kline_page_limit, 1000);
        assert_eq!(config.base_url(), "https://api.binance.com");
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let config = config().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn page_limit_is_clamped() {
        assert_eq!(config().with_kline_page_limit(0).kline_page_limit, 1);
        assert_eq!(config().with_kline_page_limit(5000).kline_page_limit, 1000);
        assert_eq!(config().with_kline_page_limit(500).kline_page_limit, 500);
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = Credentials::new("my-key".to_string(), "my-secret".to_string());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn anonymous_credentials() {
        assert!(Credentials::default().is_anonymous());
        assert!(!config().credentials.is_anonymous());
    }
}
