//! Re-export of foundational types from `coinlens-types`.
// Consolidated re-exports so downstream crates can depend on `coinlens-core` only

pub use coinlens_types::{
    AlignStrategy, Asset, AssetCode, Capability, CoinlensConfig, CoinlensError, ConnectorKey,
    CorrelationMatrix, DashboardSnapshot, DashboardState, FetchStrategy, NormalizedRow,
    NormalizedTable, PricePoint, PriceSeries, QuoteCurrency, SeriesRequest, SpotReport,
    SpotResponse, Window,
};
