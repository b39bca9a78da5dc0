use coinlens_core::{Asset, Capability, CoinlensError, SpotReport, SpotResponse};

use crate::Coinlens;
use crate::core::tag_err;

impl Coinlens {
    /// Fetch the latest price for every tracked asset.
    ///
    /// Behavior and trade-offs:
    /// - Providers are tried in registration order; the first that answers for
    ///   the assets it claims wins. A provider is asked only about the assets
    ///   it supports.
    /// - Partial success is allowed: assets absent from the winning provider's
    ///   response (and assets no provider claims) become `NotFound` warnings
    ///   instead of failing the batch. Dashboard refreshes stay all-or-nothing;
    ///   spot tickers degrade gracefully.
    /// - The optional request timeout bounds the whole operation.
    ///
    /// # Errors
    /// Returns `Unsupported` if no provider advertises the spot capability,
    /// `RequestTimeout` if the overall deadline elapses, or an aggregate error
    /// when every provider fails outright.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "coinlens::router",
            skip(self),
            fields(tracked = self.tracked.len()),
        )
    )]
    pub async fn spot(&self) -> Result<SpotReport, CoinlensError> {
        let fut = self.spot_inner();
        crate::core::with_request_deadline(self.cfg.request_timeout, fut)
            .await
            .map_err(|_| CoinlensError::request_timeout(Capability::Spot.as_str()))?
    }

    async fn spot_inner(&self) -> Result<SpotReport, CoinlensError> {
        let mut attempted_any = false;
        let mut errors: Vec<CoinlensError> = Vec::new();

        for c in &self.connectors {
            let Some(provider) = c.as_spot_provider() else {
                continue;
            };
            let supported: Vec<Asset> = self
                .tracked
                .iter()
                .filter(|a| c.supports_asset(a))
                .cloned()
                .collect();
            if supported.is_empty() {
                continue;
            }
            attempted_any = true;

            match Self::provider_call_with_timeout(
                c.name(),
                Capability::Spot.as_str(),
                self.cfg.provider_timeout,
                provider.spot(&supported, self.cfg.quote),
            )
            .await
            {
                Ok(prices) => {
                    let warnings = self
                        .tracked
                        .iter()
                        .filter(|a| !prices.contains_key(a.code()))
                        .map(|a| CoinlensError::not_found(format!("spot for {}", a.code())))
                        .collect();
                    let response = if prices.is_empty() {
                        None
                    } else {
                        Some(SpotResponse {
                            quote: self.cfg.quote,
                            prices,
                        })
                    };
                    return Ok(SpotReport { response, warnings });
                }
                Err(e @ CoinlensError::ProviderTimeout { .. }) => errors.push(e),
                Err(e) => errors.push(tag_err(c.name(), e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            Capability::Spot,
            attempted_any,
            errors,
            None,
        ))
    }
}
