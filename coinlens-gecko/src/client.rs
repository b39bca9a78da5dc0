//! Thin async HTTP client for the CoinGecko REST API (v3).

use std::time::Duration;

use coinlens_core::{CoinlensError, QuoteCurrency};
use reqwest::StatusCode;
use url::Url;

use crate::model::{MarketChartResponse, SimplePriceResponse};

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Builder for [`GeckoClient`].
///
/// Behavior and trade-offs:
/// - `base_url` points the client at a different host (a proxy, a paid tier,
///   or a local mock server). The path layout must match the v3 API.
/// - `api_key` is sent on every request via the `x-cg-demo-api-key` header;
///   without it the public anonymous quota applies.
/// - `timeout` bounds each HTTP exchange, not the whole dashboard refresh.
#[derive(Debug)]
pub struct GeckoClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeckoClientBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Attach a CoinGecko API key to every request.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request HTTP timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the base URL does not parse, or a connector
    /// error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<GeckoClient, CoinlensError> {
        // `Url::join` treats a base without a trailing slash as a file and
        // would drop its last path segment.
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .map_err(|e| CoinlensError::invalid_arg(format!("invalid base url '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CoinlensError::connector("coinlens-gecko", e.to_string()))?;

        Ok(GeckoClient {
            http,
            base,
            api_key: self.api_key,
        })
    }
}

/// Async client wrapping the two CoinGecko endpoints the dashboard needs.
#[derive(Debug)]
pub struct GeckoClient {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl GeckoClient {
    /// Start building a client.
    #[must_use]
    pub fn builder() -> GeckoClientBuilder {
        GeckoClientBuilder::new()
    }

    /// Fetch the trailing daily price chart for one asset id.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "coinlens_gecko::market_chart", skip(self))
    )]
    pub(crate) async fn market_chart(
        &self,
        id: &str,
        quote: QuoteCurrency,
        days: u32,
    ) -> Result<MarketChartResponse, CoinlensError> {
        let what = format!("series for {id}");
        let query = [
            ("vs_currency", quote.as_str().to_string()),
            ("days", days.to_string()),
            ("interval", "daily".to_string()),
        ];
        self.get_json(&format!("coins/{id}/market_chart"), &query, &what)
            .await
    }

    /// Fetch the latest price for a batch of asset ids.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "coinlens_gecko::simple_price", skip(self, ids))
    )]
    pub(crate) async fn simple_price(
        &self,
        ids: &[&str],
        quote: QuoteCurrency,
    ) -> Result<SimplePriceResponse, CoinlensError> {
        let query = [
            ("ids", ids.join(",")),
            ("vs_currencies", quote.as_str().to_string()),
        ];
        self.get_json("simple/price", &query, "spot prices").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, CoinlensError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| CoinlensError::invalid_arg(format!("invalid endpoint '{path}': {e}")))?;

        let mut request = self.http.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            CoinlensError::connector("coinlens-gecko", format!("transport failure for {what}: {e}"))
        })?;
        Self::decode(response, what).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, CoinlensError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CoinlensError::not_found(what.to_string()));
        }
        if !status.is_success() {
            return Err(CoinlensError::connector(
                "coinlens-gecko",
                format!("http {status} for {what}"),
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| CoinlensError::data(format!("undecodable body for {what}: {e}")))
    }
}
