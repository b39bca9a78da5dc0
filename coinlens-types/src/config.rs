//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::series::{QuoteCurrency, Window};

/// Strategy for selecting among eligible data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next provider on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible providers concurrently and return the first success.
    Latency,
}

/// Strategy for joining per-asset series into one rectangular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AlignStrategy {
    /// Positional join for pre-aligned input. Series of different length are
    /// rejected instead of silently mis-joined.
    ByIndex,
    /// Join on the first series' timestamps, matching each other series by
    /// nearest observation within `tolerance`. Rows without a match within
    /// tolerance get a missing value for that asset.
    ByTimestamp {
        /// Maximum distance between a canonical timestamp and a matched point.
        tolerance: Duration,
    },
}

impl Default for AlignStrategy {
    /// Timestamp join with half a daily step of slack: providers place daily
    /// points near midnight UTC but the trailing point lands at "now".
    fn default() -> Self {
        Self::ByTimestamp {
            tolerance: Duration::from_secs(12 * 60 * 60),
        }
    }
}

/// Global configuration for the `Coinlens` orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinlensConfig {
    /// Trailing lookback window for series fetches.
    pub window: Window,
    /// Quote currency for fetched prices.
    pub quote: QuoteCurrency,
    /// How per-asset series are joined before normalization.
    pub align: AlignStrategy,
    /// Strategy for fetching from multiple providers.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for fan-out aggregations (refresh/spot).
    /// If set, operations that aggregate multiple provider calls are bounded
    /// by this deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for CoinlensConfig {
    fn default() -> Self {
        Self {
            window: Window::YEAR,
            quote: QuoteCurrency::Usd,
            align: AlignStrategy::default(),
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}
