use std::collections::BTreeMap;

use async_trait::async_trait;
use coinlens_core::connector::{CoinlensConnector, SeriesProvider, SpotProvider};
use coinlens_core::{Asset, AssetCode, CoinlensError, PriceSeries, QuoteCurrency, SeriesRequest};

mod fixtures;

/// Mock connector for CI-safe examples. Serves deterministic series whose
/// shapes are easy to eyeball: bitcoin ramps up, ethereum ramps down, solana
/// oscillates, tether stays flat.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> CoinlensError {
        CoinlensError::not_found(what.to_string())
    }

    /// Forced behaviors keyed by asset id, for exercising orchestrator
    /// error and timeout paths without a network.
    async fn maybe_fail_or_timeout(id: &str, capability: &'static str) -> Result<(), CoinlensError> {
        match id {
            "fail" => Err(CoinlensError::connector(
                "coinlens-mock",
                format!("forced failure: {capability}"),
            )),
            "timeout" => {
                // Long enough to trip any sub-200ms provider timeout, short
                // enough to keep test suites quick.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CoinlensConnector for MockConnector {
    fn name(&self) -> &'static str {
        "coinlens-mock"
    }
    fn vendor(&self) -> &'static str {
        "Fixtures"
    }

    fn supports_asset(&self, asset: &Asset) -> bool {
        fixtures::series::knows(asset.id()) || matches!(asset.id(), "fail" | "timeout")
    }

    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        Some(self as &dyn SeriesProvider)
    }
    fn as_spot_provider(&self) -> Option<&dyn SpotProvider> {
        Some(self as &dyn SpotProvider)
    }
}

#[async_trait]
impl SeriesProvider for MockConnector {
    async fn series(
        &self,
        asset: &Asset,
        req: SeriesRequest,
    ) -> Result<PriceSeries, CoinlensError> {
        Self::maybe_fail_or_timeout(asset.id(), "series").await?;
        fixtures::series::by_id(asset.id(), asset.code(), req.window)
            .ok_or_else(|| Self::not_found(&format!("series for {}", asset.id())))
    }

    fn supported_quotes(&self) -> &'static [QuoteCurrency] {
        const ONLY_USD: &[QuoteCurrency] = &[QuoteCurrency::Usd];
        ONLY_USD
    }
}

#[async_trait]
impl SpotProvider for MockConnector {
    async fn spot(
        &self,
        assets: &[Asset],
        _quote: QuoteCurrency,
    ) -> Result<BTreeMap<AssetCode, f64>, CoinlensError> {
        let mut prices = BTreeMap::new();
        for asset in assets {
            Self::maybe_fail_or_timeout(asset.id(), "spot").await?;
            if let Some(price) = fixtures::spot::by_id(asset.id()) {
                prices.insert(asset.code().clone(), price);
            }
        }
        Ok(prices)
    }
}
