//! coinlens-core
//!
//! Core traits and the analytics pipeline shared across the coinlens
//! ecosystem.
//!
//! - `types`: re-exported data structures (assets, series, tables, matrices,
//!   dashboard state).
//! - `connector`: the `CoinlensConnector` trait and capability provider traits.
//! - `render`: capability-typed renderer traits plus the dashboard driver.
//! - `analytics`: timestamp/index alignment, min-max normalization, and the
//!   Pearson correlation matrix.
//!
//! The pipeline is pure and synchronous; only the connector contracts are
//! async. Code that drives connectors is expected to run under a Tokio 1.x
//! runtime (the facade crate does).
#![warn(missing_docs)]

/// Alignment, normalization, and correlation.
pub mod analytics;
/// Connector capability traits and the primary `CoinlensConnector` interface.
pub mod connector;
/// Renderer capability traits and the dashboard render driver.
pub mod render;
pub mod types;

pub use analytics::align::{AlignedFrame, align};
pub use analytics::correlate::{correlation_matrix, pearson};
pub use analytics::normalize::{align_and_normalize, normalize, normalize_against};
pub use connector::{CoinlensConnector, SeriesProvider, SpotProvider};
pub use render::{DashboardRenderer, MatrixRenderer, SeriesRenderer, render_dashboard};
pub use types::*;
