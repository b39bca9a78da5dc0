//! The NxN Pearson correlation matrix produced by the analytics pipeline.

use serde::{Deserialize, Serialize};

use crate::CoinlensError;
use crate::asset::AssetCode;

/// Pearson correlation coefficients for every ordered pair of asset columns.
///
/// Row and column order both follow `keys`. Construction validates squareness;
/// symmetry is an invariant of the producing engine, not re-checked here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    keys: Vec<AssetCode>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build a matrix from axis keys and row-major values.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `values` is not square with side `keys.len()`.
    pub fn from_rows(keys: Vec<AssetCode>, values: Vec<Vec<f64>>) -> Result<Self, CoinlensError> {
        if values.len() != keys.len() || values.iter().any(|row| row.len() != keys.len()) {
            return Err(CoinlensError::invalid_arg(format!(
                "correlation matrix must be square with side {}",
                keys.len()
            )));
        }
        Ok(Self { keys, values })
    }

    /// Matrix with no axes and no values.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Axis keys in table order.
    #[must_use]
    pub fn keys(&self) -> &[AssetCode] {
        &self.keys
    }

    /// Row-major coefficient grid.
    #[must_use]
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Side length of the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the matrix has no axes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Coefficient at `(row, col)`, if both indices are in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Coefficient for a pair of asset keys, if both are on the axes.
    #[must_use]
    pub fn pair(&self, a: &AssetCode, b: &AssetCode) -> Option<f64> {
        let row = self.keys.iter().position(|k| k == a)?;
        let col = self.keys.iter().position(|k| k == b)?;
        self.get(row, col)
    }
}
