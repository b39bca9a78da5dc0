//! Asset identity types shared across the coinlens workspace.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CoinlensError;

/// Validated short key identifying an asset column in tables and matrices.
///
/// Codes are non-empty, ASCII alphanumeric, and stored lowercase; `"BTC"` and
/// `"btc"` construct the same key. Serialized as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetCode(String);

impl AssetCode {
    /// Construct a validated asset code.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the code is empty or contains characters other
    /// than ASCII letters and digits.
    pub fn new(code: impl Into<String>) -> Result<Self, CoinlensError> {
        let code = code.into();
        if code.is_empty() {
            return Err(CoinlensError::invalid_arg("asset code must not be empty"));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoinlensError::invalid_arg(format!(
                "asset code '{code}' must be ASCII alphanumeric"
            )));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Returns the canonical lowercase code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AssetCode {
    type Error = CoinlensError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetCode> for String {
    fn from(code: AssetCode) -> Self {
        code.0
    }
}

/// A tracked asset: the provider-facing identifier plus the table key.
///
/// `id` is the slug the market data API understands (e.g. `"bitcoin"`), `code`
/// the short key used for table columns and matrix axes (e.g. `"btc"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    id: String,
    code: AssetCode,
}

impl Asset {
    /// Construct a validated asset.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the id is empty or is not a lowercase slug
    /// (ASCII letters, digits, `-`), or if the code fails [`AssetCode`]
    /// validation.
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Result<Self, CoinlensError> {
        let id = id.into().to_ascii_lowercase();
        if id.is_empty() {
            return Err(CoinlensError::invalid_arg("asset id must not be empty"));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(CoinlensError::invalid_arg(format!(
                "asset id '{id}' must be a slug of ASCII letters, digits, or '-'"
            )));
        }
        Ok(Self {
            id,
            code: AssetCode::new(code)?,
        })
    }

    /// The provider-facing identifier (slug).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The short table key.
    #[must_use]
    pub fn code(&self) -> &AssetCode {
        &self.code
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.id)
    }
}
