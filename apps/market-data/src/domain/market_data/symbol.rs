//! Symbol value object for exchange trading pairs.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Pattern Binance accepts for spot symbols.
#[allow(clippy::expect_used)]
static SYMBOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9\-_.]{1,20}$").expect("static symbol pattern is valid")
});

/// An exchange trading-pair identifier, e.g. `BTCUSDT` (base asset quoted in
/// a settlement asset).
///
/// Always upper case and validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a validated symbol. Input is trimmed and upper-cased.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, longer than 20 characters or
    /// contains characters outside `A-Z 0-9 - _ .`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = value.as_ref().trim().to_uppercase();

        if normalized.is_empty() {
            return Err(DomainError::invalid("symbol", "Symbol cannot be empty"));
        }

        if !SYMBOL_PATTERN.is_match(&normalized) {
            return Err(DomainError::invalid(
                "symbol",
                format!("'{normalized}' is not a valid trading pair identifier"),
            ));
        }

        Ok(Self(normalized))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
