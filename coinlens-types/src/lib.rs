//! Coinlens-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod asset;
mod capability;
mod config;
mod connector;
mod error;
mod matrix;
mod reports;
mod series;
mod state;
mod table;

pub use asset::{Asset, AssetCode};
pub use capability::Capability;
pub use config::{AlignStrategy, CoinlensConfig, FetchStrategy};
pub use connector::ConnectorKey;
pub use error::CoinlensError;
pub use matrix::CorrelationMatrix;
pub use reports::{SpotReport, SpotResponse};
pub use series::{PricePoint, PriceSeries, QuoteCurrency, SeriesRequest, Window};
pub use state::{DashboardSnapshot, DashboardState};
pub use table::{NormalizedRow, NormalizedTable};
