//! Report envelopes for fan-out operations that tolerate partial results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::CoinlensError;
use crate::asset::AssetCode;
use crate::series::QuoteCurrency;

/// Latest prices per asset key, denominated in `quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotResponse {
    /// Quote currency of every price in the map.
    pub quote: QuoteCurrency,
    /// Latest price per asset key.
    pub prices: BTreeMap<AssetCode, f64>,
}

/// Outcome of a batch spot-price fetch.
///
/// Unlike a dashboard refresh, spot fetches are allowed to succeed partially:
/// assets the winning provider could not price become warnings instead of
/// failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotReport {
    /// Prices for the assets that resolved, or `None` if none did.
    pub response: Option<SpotResponse>,
    /// Per-asset failures that did not abort the batch.
    pub warnings: Vec<CoinlensError>,
}

impl SpotReport {
    /// Whether every requested asset resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.response.is_some() && self.warnings.is_empty()
    }
}
