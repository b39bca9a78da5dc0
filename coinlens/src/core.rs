use std::collections::HashMap;
#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::sync::Arc;

use coinlens_core::connector::ConnectorKey;
use coinlens_core::{
    AlignStrategy, Asset, AssetCode, CoinlensConfig, CoinlensConnector, CoinlensError,
    FetchStrategy, QuoteCurrency, Window,
};

/// Orchestrator that routes requests across registered providers and drives
/// the dashboard pipeline for a fixed set of tracked assets.
pub struct Coinlens {
    pub(crate) connectors: Vec<Arc<dyn CoinlensConnector>>,
    pub(crate) tracked: Vec<Asset>,
    pub(crate) cfg: CoinlensConfig,
    pub(crate) per_asset_priority: HashMap<AssetCode, Vec<ConnectorKey>>,
}

/// Builder for constructing a `Coinlens` orchestrator with custom configuration.
pub struct CoinlensBuilder {
    connectors: Vec<Arc<dyn CoinlensConnector>>,
    tracked: Vec<Asset>,
    cfg: CoinlensConfig,
    per_asset_priority: HashMap<AssetCode, Vec<ConnectorKey>>,
}

impl Default for CoinlensBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinlensBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors and no tracked assets; you must register at
    ///   least one connector via [`with_connector`](Self::with_connector).
    /// - Defaults are conservative: a 365-day window quoted in USD, timestamp
    ///   alignment with half-day tolerance, priority-with-fallback fetches,
    ///   and a 5s per-provider timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            tracked: vec![],
            cfg: CoinlensConfig::default(),
            per_asset_priority: HashMap::new(),
        }
    }

    /// Register a provider connector.
    ///
    /// Behavior and trade-offs:
    /// - Registration order is the fallback ordering when no explicit
    ///   priorities are set via [`prefer_for_asset`](Self::prefer_for_asset).
    /// - Multiple connectors can support the same capability; the orchestrator
    ///   routes based on priorities and the selected fetch strategy.
    /// - Duplicates are not deduplicated; avoid registering the same connector
    ///   twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn CoinlensConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Add one asset to the tracked set refreshed by the dashboard.
    ///
    /// Tracked order is preserved: it defines table column order and matrix
    /// axis order. Duplicate asset codes are rejected at [`build`](Self::build).
    #[must_use]
    pub fn track(mut self, asset: Asset) -> Self {
        self.tracked.push(asset);
        self
    }

    /// Add several assets to the tracked set, in order.
    #[must_use]
    pub fn track_all(mut self, assets: &[Asset]) -> Self {
        self.tracked.extend_from_slice(assets);
        self
    }

    /// Set preferred providers for an asset using connector instances.
    ///
    /// Behavior and trade-offs:
    /// - Influences ordering among eligible providers for the given asset; it
    ///   does not filter out non-listed connectors (they remain after the
    ///   listed ones).
    /// - Type-safe and ergonomic: eliminates the possibility of typos and
    ///   makes refactoring safer.
    #[must_use]
    pub fn prefer_for_asset(
        mut self,
        code: AssetCode,
        connectors_desc: &[Arc<dyn CoinlensConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc
            .iter()
            .map(|c| ConnectorKey::new(c.name()))
            .collect();
        self.per_asset_priority.insert(code, keys);
        self
    }

    /// Set the trailing lookback window for series fetches.
    #[must_use]
    pub const fn window(mut self, window: Window) -> Self {
        self.cfg.window = window;
        self
    }

    /// Set the quote currency for fetched prices.
    ///
    /// Connectors that do not list the configured currency among their
    /// supported quotes are skipped during routing rather than asked for a
    /// conversion they cannot perform.
    #[must_use]
    pub const fn quote_currency(mut self, quote: QuoteCurrency) -> Self {
        self.cfg.quote = quote;
        self
    }

    /// Select the strategy for joining per-asset series before normalization.
    ///
    /// Behavior and trade-offs:
    /// - `ByTimestamp` (the default) joins on the first series' timestamps
    ///   with a tolerance and shrugs off ragged input.
    /// - `ByIndex` is a strict positional join for pre-aligned input; a length
    ///   mismatch fails the refresh instead of silently pairing unrelated
    ///   observations.
    #[must_use]
    pub const fn align_strategy(mut self, strategy: AlignStrategy) -> Self {
        self.cfg.align = strategy;
        self
    }

    /// Select the fetch strategy for multi-provider requests.
    ///
    /// Behavior and trade-offs:
    /// - `PriorityWithFallback`: deterministic order, applies per-provider
    ///   timeout, aggregates errors; may be slower but predictable and
    ///   economical on rate limits.
    /// - `Latency`: race all eligible providers and return the first success;
    ///   fastest typical latency but consumes more concurrent requests.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    ///
    /// Applied in both `PriorityWithFallback` and `Latency` strategies to
    /// bound each provider call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall request timeout for fan-out aggregations (refresh/spot).
    ///
    /// Behavior and trade-offs:
    /// - Bounds total latency even when many providers time out sequentially.
    /// - When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the whole configuration at once (e.g. loaded from a file).
    ///
    /// Builder modifiers called afterwards still apply on top.
    #[must_use]
    pub fn config(mut self, cfg: CoinlensConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Coinlens` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered, or if two
    /// tracked assets share the same code.
    pub fn build(mut self) -> Result<Coinlens, CoinlensError> {
        // Validate priority keys against registered connectors; drop unknowns and dedup.
        let known: std::collections::HashSet<&'static str> =
            self.connectors.iter().map(|c| c.name()).collect();

        for v in self.per_asset_priority.values_mut() {
            let mut out: Vec<ConnectorKey> = Vec::new();
            let mut seen: std::collections::HashSet<&'static str> =
                std::collections::HashSet::new();
            for k in v.iter().copied() {
                let n = k.as_str();
                if known.contains(n) && seen.insert(n) {
                    out.push(k);
                }
            }
            *v = out;
        }

        if self.connectors.is_empty() {
            return Err(CoinlensError::invalid_arg(
                "no connectors registered; add at least one via with_connector(...)",
            ));
        }

        let mut codes: std::collections::HashSet<&AssetCode> = std::collections::HashSet::new();
        for asset in &self.tracked {
            if !codes.insert(asset.code()) {
                return Err(CoinlensError::invalid_arg(format!(
                    "duplicate asset code '{}' in tracked set",
                    asset.code()
                )));
            }
        }

        Ok(Coinlens {
            connectors: self.connectors,
            tracked: self.tracked,
            cfg: self.cfg,
            per_asset_priority: self.per_asset_priority,
        })
    }
}

pub fn tag_err(connector: &str, e: CoinlensError) -> CoinlensError {
    match e {
        e @ (CoinlensError::NotFound { .. }
        | CoinlensError::ProviderTimeout { .. }
        | CoinlensError::Connector { .. }
        | CoinlensError::RequestTimeout { .. }
        | CoinlensError::AllProvidersTimedOut { .. }
        | CoinlensError::AllProvidersFailed(_)) => e,
        other => CoinlensError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Apply an optional overall deadline to a future. On timeout, returns
/// `RequestTimeout` for the generic "request" capability; call sites remap
/// to a more specific label as needed.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<std::time::Duration>,
    fut: Fut,
) -> Result<T, CoinlensError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .map_err(|_| CoinlensError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Coinlens {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinlens::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, CoinlensError>
    where
        Fut: core::future::Future<Output = Result<T, CoinlensError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(CoinlensError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Coinlens` instance.
    ///
    /// Typical usage chains provider registration, tracked assets, and
    /// preferences, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let gecko = Arc::new(coinlens_gecko::GeckoConnector::try_default()?);
    ///
    /// let lens = coinlens::Coinlens::builder()
    ///     .with_connector(gecko)
    ///     .track(coinlens::Asset::new("bitcoin", "btc")?)
    ///     .track(coinlens::Asset::new("ethereum", "eth")?)
    ///     .fetch_strategy(coinlens::FetchStrategy::PriorityWithFallback)
    ///     .build()?;
    ///
    /// let snapshot = lens.refresh().await?;
    /// ```
    #[must_use]
    pub fn builder() -> CoinlensBuilder {
        CoinlensBuilder::new()
    }

    /// The tracked asset set, in column order.
    #[must_use]
    pub fn tracked(&self) -> &[Asset] {
        &self.tracked
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &CoinlensConfig {
        &self.cfg
    }

    pub(crate) fn ordered(&self, asset: &Asset) -> Vec<Arc<dyn CoinlensConnector>> {
        let out: Vec<(usize, Arc<dyn CoinlensConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();

        if let Some(pref) = self.per_asset_priority.get(asset.code()) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            let mut v = out;
            v.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
            return v.into_iter().map(|(_, c)| c).collect();
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Generic single-asset fetch helper.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies per-provider timeout in both modes
    /// - Aggregates errors and treats `NotFound` specially in fallback mode
    /// - In latency mode, returns the first success; if all attempted
    ///   providers fail, aggregates and returns `AllProvidersFailed`; if no
    ///   providers support the capability, returns a capability error
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinlens::core::fetch_single",
            skip(self, call),
            fields(asset = %asset.code(), capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        asset: &Asset,
        capability: coinlens_core::Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, CoinlensError>
    where
        T: Send,
        F: Fn(Arc<dyn CoinlensConnector>, Asset) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, CoinlensError>> + Send,
    {
        match self.cfg.fetch_strategy {
            FetchStrategy::PriorityWithFallback => {
                self.fetch_single_priority_with_fallback(asset, capability, not_found_label, call)
                    .await
            }
            FetchStrategy::Latency => {
                self.fetch_single_latency(asset, capability, not_found_label, call)
                    .await
            }
            _ => Err(CoinlensError::invalid_arg("unknown fetch strategy")),
        }
    }

    async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        asset: &Asset,
        capability: coinlens_core::Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, CoinlensError>
    where
        T: Send,
        F: Fn(Arc<dyn CoinlensConnector>, Asset) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, CoinlensError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<CoinlensError> = Vec::new();

        for c in self.ordered(asset) {
            if let Some(fut) = call(c.clone(), asset.clone()) {
                attempted_any = true;
                match Self::provider_call_with_timeout(
                    c.name(),
                    capability.as_str(),
                    self.cfg.provider_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(
                        e @ (CoinlensError::NotFound { .. } | CoinlensError::ProviderTimeout { .. }),
                    ) => {
                        errors.push(e);
                    }
                    Err(e) => {
                        errors.push(tag_err(c.name(), e));
                    }
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{} for {}", not_found_label, asset.code())),
        ))
    }

    async fn fetch_single_latency<T, F, Fut>(
        &self,
        asset: &Asset,
        capability: coinlens_core::Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, CoinlensError>
    where
        T: Send,
        F: Fn(Arc<dyn CoinlensConnector>, Asset) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, CoinlensError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        let mut attempted_any = false;
        for c in self.ordered(asset) {
            if let Some(fut) = call(c.clone(), asset.clone()) {
                let name = c.name();
                let timeout = self.cfg.provider_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::provider_call_with_timeout(name, capability.as_str(), timeout, fut)
                            .await,
                    )
                });
                attempted_any = true;
            }
        }

        let mut errors: Vec<CoinlensError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(
                    e @ (CoinlensError::ProviderTimeout { .. } | CoinlensError::NotFound { .. }),
                ) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{} for {}", not_found_label, asset.code())),
        ))
    }
}
