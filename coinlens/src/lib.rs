//! Coinlens orchestrates a crypto correlation dashboard across pluggable
//! market data providers.
//!
//! Overview
//! - Routes series and spot requests to connectors that implement the
//!   `coinlens_core` contracts, honoring per-asset priorities.
//! - Refreshes a fixed tracked set in one concurrent fan-out, then feeds the
//!   raw series through the align → normalize → correlate pipeline.
//! - Publishes results through an explicit `Loading | Failed | Ready` state
//!   and a capability-typed renderer seam.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-provider timeout,
//!     aggregates errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races eligible providers; lowest tail latency but higher request fanout.
//! - Refresh is all-or-nothing: one failed asset aborts the whole cycle and
//!   the previous snapshot stays valid. Spot fetches, by contrast, tolerate
//!   gaps and degrade to per-asset warnings.
//! - Alignment: `ByTimestamp` joins ragged series on the first series' clock
//!   within a tolerance; `ByIndex` is strict and rejects length mismatches.
//! - Rendering: renderers advertise capabilities the way connectors do; a
//!   renderer without heat-map support is skipped for that panel, never
//!   special-cased.
//!
//! Examples
//! Building an orchestrator and refreshing the dashboard:
//! ```rust,ignore
//! use std::sync::Arc;
//! use coinlens::{Asset, Coinlens};
//!
//! let gecko = Arc::new(coinlens_gecko::GeckoConnector::try_default()?);
//!
//! let lens = Coinlens::builder()
//!     .with_connector(gecko)
//!     .track(Asset::new("bitcoin", "btc")?)
//!     .track(Asset::new("ethereum", "eth")?)
//!     .build()?;
//!
//! let state = lens.refresh_state().await;
//! let mut renderer = coinlens::TextRenderer::new(std::io::stdout());
//! lens.render(&mut renderer, &state)?;
//! ```
//!
//! See `coinlens/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;
mod text;

pub use core::{Coinlens, CoinlensBuilder};
pub use router::util::{collapse_errors, join_with_deadline};
pub use text::TextRenderer;

// Re-export core types for convenience
pub use coinlens_core::{
    // Pipeline
    AlignStrategy,
    AlignedFrame,
    // Foundational types
    Asset,
    AssetCode,
    Capability,
    CoinlensConfig,
    CoinlensConnector,
    CoinlensError,
    CorrelationMatrix,
    DashboardSnapshot,
    DashboardState,
    FetchStrategy,
    NormalizedRow,
    NormalizedTable,
    PricePoint,
    PriceSeries,
    QuoteCurrency,
    SeriesRequest,
    SpotReport,
    SpotResponse,
    Window,
    align,
    align_and_normalize,
    correlation_matrix,
    normalize,
    pearson,
    render::{DashboardRenderer, MatrixRenderer, SeriesRenderer, render_dashboard},
};
