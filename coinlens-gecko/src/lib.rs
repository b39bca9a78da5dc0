//! coinlens-gecko
//!
//! Public connector that implements `CoinlensConnector` on top of the
//! CoinGecko REST API (v3). Exposes trailing daily price series and batch
//! spot prices for any asset id CoinGecko knows.
#![warn(missing_docs)]

mod client;
mod model;

use std::collections::BTreeMap;

use async_trait::async_trait;
use coinlens_core::connector::{CoinlensConnector, ConnectorKey, SeriesProvider, SpotProvider};
use coinlens_core::{Asset, AssetCode, CoinlensError, PriceSeries, QuoteCurrency, SeriesRequest};

pub use client::{GeckoClient, GeckoClientBuilder};

/// CoinGecko-backed connector.
pub struct GeckoConnector {
    client: GeckoClient,
}

impl GeckoConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("coinlens-gecko");

    /// Build against the public API with default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn try_default() -> Result<Self, CoinlensError> {
        Ok(Self::with_client(GeckoClient::builder().build()?))
    }

    /// Build from a pre-configured [`GeckoClient`] (custom base URL, API key,
    /// or timeout).
    #[must_use]
    pub const fn with_client(client: GeckoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SeriesProvider for GeckoConnector {
    async fn series(
        &self,
        asset: &Asset,
        req: SeriesRequest,
    ) -> Result<PriceSeries, CoinlensError> {
        let chart = self
            .client
            .market_chart(asset.id(), req.quote, req.window.as_days())
            .await?;
        let series = chart.into_series(asset.code().clone())?;
        if series.is_empty() {
            return Err(CoinlensError::not_found(format!(
                "series for {}",
                asset.id()
            )));
        }
        Ok(series)
    }

    fn supported_quotes(&self) -> &'static [QuoteCurrency] {
        const VS_CURRENCIES: &[QuoteCurrency] = &[
            QuoteCurrency::Usd,
            QuoteCurrency::Eur,
            QuoteCurrency::Gbp,
            QuoteCurrency::Btc,
            QuoteCurrency::Eth,
        ];
        VS_CURRENCIES
    }
}

#[async_trait]
impl SpotProvider for GeckoConnector {
    async fn spot(
        &self,
        assets: &[Asset],
        quote: QuoteCurrency,
    ) -> Result<BTreeMap<AssetCode, f64>, CoinlensError> {
        let ids: Vec<&str> = assets.iter().map(Asset::id).collect();
        let raw = self.client.simple_price(&ids, quote).await?;

        let mut prices = BTreeMap::new();
        for asset in assets {
            if let Some(price) = raw
                .get(asset.id())
                .and_then(|entry| entry.get(quote.as_str()))
            {
                prices.insert(asset.code().clone(), *price);
            }
        }
        Ok(prices)
    }
}

#[async_trait]
impl CoinlensConnector for GeckoConnector {
    fn name(&self) -> &'static str {
        "coinlens-gecko"
    }
    fn vendor(&self) -> &'static str {
        "CoinGecko"
    }

    /// CoinGecko covers a very broad id space; claim everything and let the
    /// API answer 404 for ids it does not know.
    fn supports_asset(&self, _asset: &Asset) -> bool {
        true
    }

    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        Some(self as &dyn SeriesProvider)
    }
    fn as_spot_provider(&self) -> Option<&dyn SpotProvider> {
        Some(self as &dyn SpotProvider)
    }
}
