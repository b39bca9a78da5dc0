//! Raw price series and the request parameters that shape a fetch.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::AssetCode;

/// A single observation: UTC timestamp plus price in the quote currency.
///
/// Wire formats carry integer Unix milliseconds; connectors convert to
/// `DateTime<Utc>` at the boundary. Prices are `f64` end to end because the
/// normalization and correlation contracts are defined over IEEE floats
/// (non-finite values are coerced downstream, never rejected here).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation timestamp.
    pub ts: DateTime<Utc>,
    /// Price in the requested quote currency.
    pub price: f64,
}

/// A raw per-asset price series as returned by a connector.
///
/// The asset key travels with the data; downstream joins never rely on the
/// caller keeping a parallel key list in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Key of the asset this series belongs to.
    pub asset: AssetCode,
    /// Observations, ordered by timestamp ascending for well-behaved
    /// connectors; the aligner sorts defensively.
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from an asset code and observations.
    #[must_use]
    pub const fn new(asset: AssetCode, points: Vec<PricePoint>) -> Self {
        Self { asset, points }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterator over raw prices in series order.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }
}

/// Trailing lookback window expressed in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    days: u32,
}

impl Window {
    /// The default trailing window: one year of daily observations.
    pub const YEAR: Self = Self { days: 365 };

    /// Construct a window covering the trailing `days` days.
    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    /// The window length in days.
    #[must_use]
    pub const fn as_days(self) -> u32 {
        self.days
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::YEAR
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days)
    }
}

/// Quote currency the series is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum QuoteCurrency {
    /// US dollar (the default for dashboards).
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Bitcoin-denominated prices.
    Btc,
    /// Ether-denominated prices.
    Eth,
}

impl QuoteCurrency {
    /// Stable lowercase identifier used on the wire and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Btc => "btc",
            Self::Eth => "eth",
        }
    }
}

impl fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a historical series fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Trailing lookback window.
    pub window: Window,
    /// Quote currency for the returned prices.
    pub quote: QuoteCurrency,
}

impl SeriesRequest {
    /// Build a request from a window and quote currency.
    #[must_use]
    pub const fn new(window: Window, quote: QuoteCurrency) -> Self {
        Self { window, quote }
    }
}
