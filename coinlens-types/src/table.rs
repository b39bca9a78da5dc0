//! Aligned, normalized price tables: the input to correlation and rendering.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::AssetCode;

/// One aligned instant: a timestamp plus the normalized value of every asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Canonical row timestamp, taken from the first input series.
    pub ts: DateTime<Utc>,
    /// Normalized value per asset key.
    pub values: BTreeMap<AssetCode, f64>,
}

impl NormalizedRow {
    /// Human-readable date label for this row (`YYYY-MM-DD`, UTC).
    #[must_use]
    pub fn date_label(&self) -> String {
        self.ts.format("%Y-%m-%d").to_string()
    }

    /// Normalized value for `key`, if present in this row.
    #[must_use]
    pub fn get(&self, key: &AssetCode) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// A rectangular table of normalized values, one row per aligned instant.
///
/// `keys` preserves the input series order and defines the column/axis order
/// used by the correlation matrix and renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// Asset keys in input order.
    pub keys: Vec<AssetCode>,
    /// Aligned rows, ordered by the first series' timestamps.
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    /// Table with no keys and no rows.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            keys: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract the column for `key`, coercing missing or non-finite entries
    /// to `0.0`.
    ///
    /// Correlation consumes columns through this accessor so that degenerate
    /// entries can never poison the sums.
    #[must_use]
    pub fn column(&self, key: &AssetCode) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| match row.get(key) {
                Some(v) if v.is_finite() => v,
                _ => 0.0,
            })
            .collect()
    }

    /// Iterator over the `YYYY-MM-DD` labels of every row.
    pub fn date_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(NormalizedRow::date_label)
    }
}
