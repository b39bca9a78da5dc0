//! Explicit dashboard lifecycle state.
//!
//! Consumers receive exactly one of three states and can always distinguish a
//! pending refresh from a failure from ready data; there are no side-channel
//! flags to keep in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoinlensError;
use crate::matrix::CorrelationMatrix;
use crate::table::NormalizedTable;

/// Everything a successful refresh publishes, atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Aligned, min-max normalized table.
    pub table: NormalizedTable,
    /// Pearson correlation matrix over the table columns.
    pub matrix: CorrelationMatrix,
    /// When the refresh completed.
    pub fetched_at: DateTime<Utc>,
}

/// The dashboard's render-facing state.
///
/// A refresh either replaces the previous snapshot wholesale (`Ready`) or
/// leaves it untouched and reports why (`Failed`); partial data is never
/// published. `Loading` is the default, held before the first refresh
/// completes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DashboardState {
    /// A refresh is pending; no data yet.
    #[default]
    Loading,
    /// The last refresh failed; carries the reason.
    Failed {
        /// Why the refresh failed.
        error: CoinlensError,
    },
    /// The last refresh succeeded.
    Ready(DashboardSnapshot),
}

impl DashboardState {
    /// Whether the state is `Loading`.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the state is `Failed`.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the state is `Ready`.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The snapshot, when ready.
    #[must_use]
    pub const fn ready(&self) -> Option<&DashboardSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The failure reason, when failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CoinlensError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

impl From<Result<DashboardSnapshot, CoinlensError>> for DashboardState {
    fn from(res: Result<DashboardSnapshot, CoinlensError>) -> Self {
        match res {
            Ok(snapshot) => Self::Ready(snapshot),
            Err(error) => Self::Failed { error },
        }
    }
}
