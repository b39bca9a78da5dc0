use coinlens_core::{Asset, Capability, CoinlensError, PriceSeries, SeriesRequest};

use crate::Coinlens;

impl Coinlens {
    /// Fetch the trailing price series for a single asset.
    ///
    /// Behavior and trade-offs:
    /// - Eligible providers must claim the asset, advertise the series
    ///   capability, and natively support the configured quote currency;
    ///   everything else is skipped rather than asked for a conversion.
    /// - Honors the builder's `FetchStrategy`: `PriorityWithFallback` applies
    ///   the per-provider timeout and aggregates errors; `Latency` races
    ///   providers and returns the first success (lower latency, higher
    ///   request fanout).
    /// - `NotFound` from every attempted provider maps to a `NotFound`
    ///   outcome; a mix of failures aggregates into `AllProvidersFailed`.
    ///
    /// # Errors
    /// Returns an error if no eligible provider succeeds or none support the
    /// capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "coinlens::router",
            skip(self),
            fields(asset = %asset.code()),
        )
    )]
    pub async fn series(&self, asset: &Asset) -> Result<PriceSeries, CoinlensError> {
        let req = SeriesRequest::new(self.cfg.window, self.cfg.quote);
        let quote = self.cfg.quote;
        self.fetch_single(asset, Capability::Series, "series", move |c, a| {
            if !c.supports_asset(&a) {
                return None;
            }
            let c2 = c.clone();
            if c2
                .as_series_provider()
                .is_some_and(|p| p.supported_quotes().contains(&quote))
            {
                Some(async move {
                    if let Some(p) = c2.as_series_provider() {
                        p.series(&a, req).await
                    } else {
                        Err(CoinlensError::connector(
                            c2.name(),
                            "missing series capability during call",
                        ))
                    }
                })
            } else {
                None
            }
        })
        .await
    }
}
