use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::types::{Asset, AssetCode, CoinlensError, PriceSeries, QuoteCurrency, SeriesRequest};
pub use coinlens_types::ConnectorKey;

/// Focused role trait for connectors that provide historical price series.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Fetch the trailing price series for `asset` under the given request.
    async fn series(
        &self,
        asset: &Asset,
        req: SeriesRequest,
    ) -> Result<PriceSeries, CoinlensError>;

    /// REQUIRED: exact quote currencies this connector can natively serve.
    ///
    /// The orchestrator filters out connectors that do not list the configured
    /// quote currency instead of forwarding requests they would reject.
    fn supported_quotes(&self) -> &'static [QuoteCurrency];
}

/// Focused role trait for connectors that provide batch latest prices.
#[async_trait]
pub trait SpotProvider: Send + Sync {
    /// Fetch the latest price for each asset, keyed by asset code.
    ///
    /// Assets the provider cannot price are absent from the returned map
    /// rather than failing the batch; callers decide how to surface gaps.
    async fn spot(
        &self,
        assets: &[Asset],
        quote: QuoteCurrency,
    ) -> Result<BTreeMap<AssetCode, f64>, CoinlensError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait CoinlensConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "coinlens-gecko").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    ///
    /// Use this helper when configuring per-asset priorities.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to support a given asset.
    ///
    /// Default: returns `false` for all assets. Connectors must explicitly
    /// override this method to declare what they serve.
    fn supports_asset(&self, asset: &Asset) -> bool {
        let _ = asset;
        false
    }

    /// Advertise series capability by returning a usable trait object reference when supported.
    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        None
    }

    /// Advertise spot capability by returning a usable trait object reference when supported.
    fn as_spot_provider(&self) -> Option<&dyn SpotProvider> {
        None
    }
}
