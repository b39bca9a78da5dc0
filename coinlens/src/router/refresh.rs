use chrono::Utc;
use coinlens_core::analytics::align_and_normalize;
use coinlens_core::analytics::correlation_matrix;
use coinlens_core::render::{DashboardRenderer, render_dashboard};
use coinlens_core::{Asset, Capability, CoinlensError, DashboardSnapshot, DashboardState, PriceSeries};

use crate::Coinlens;
use crate::router::util::join_with_deadline;

impl Coinlens {
    /// Refresh the dashboard: fetch every tracked asset's series, align and
    /// normalize them, and compute the correlation matrix.
    ///
    /// Behavior and trade-offs:
    /// - Per-asset fetches run concurrently; the optional request timeout
    ///   bounds the whole fan-out.
    /// - All-or-nothing: a failure for any tracked asset aborts the refresh
    ///   with that asset's error (first in tracked order). No partial snapshot
    ///   is ever published; the caller's previous state stays valid.
    /// - An empty tracked set yields an empty snapshot rather than an error.
    ///
    /// # Errors
    /// Returns the first per-asset fetch error in tracked order, a
    /// `RequestTimeout` if the overall deadline elapses, or an `InvalidArg`
    /// from the alignment stage.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "coinlens::router",
            skip(self),
            fields(tracked = self.tracked.len()),
        )
    )]
    pub async fn refresh(&self) -> Result<DashboardSnapshot, CoinlensError> {
        let tasks = self.tracked.iter().map(|asset| {
            let lens = self;
            let asset = asset.clone();
            async move {
                let res = lens.series(&asset).await;
                (asset, res)
            }
        });

        let joined: Vec<(Asset, Result<PriceSeries, CoinlensError>)> =
            join_with_deadline(tasks, self.cfg.request_timeout)
                .await
                .map_err(|_| CoinlensError::request_timeout(Capability::Refresh.as_str()))?;

        let mut series: Vec<PriceSeries> = Vec::with_capacity(joined.len());
        for (_, res) in joined {
            series.push(res?);
        }

        let table = align_and_normalize(&series, self.cfg.align)?;
        let matrix = correlation_matrix(&table);
        Ok(DashboardSnapshot {
            table,
            matrix,
            fetched_at: Utc::now(),
        })
    }

    /// Refresh and fold the outcome into a render-facing [`DashboardState`].
    ///
    /// Success maps to `Ready`, failure to `Failed`; `Loading` is the state's
    /// `Default`, held by callers before and during a refresh.
    pub async fn refresh_state(&self) -> DashboardState {
        self.refresh().await.into()
    }

    /// Drive a renderer with the given state.
    ///
    /// Convenience forwarding to [`coinlens_core::render::render_dashboard`]:
    /// `Ready` fans the snapshot out to whichever capabilities the renderer
    /// advertises; other states go to its status hook.
    ///
    /// # Errors
    /// Propagates the first renderer error.
    pub fn render(
        &self,
        renderer: &mut dyn DashboardRenderer,
        state: &DashboardState,
    ) -> Result<(), CoinlensError> {
        render_dashboard(renderer, state)
    }
}
