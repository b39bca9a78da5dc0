//! Min-max normalization with fixed degenerate-input rules.

use std::collections::HashSet;

use crate::analytics::align::align;
use crate::types::{AlignStrategy, AssetCode, CoinlensError, NormalizedRow, NormalizedTable,
    PriceSeries};

/// Min and max over the finite values of the iterator, `None` if there are none.
fn finite_min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for v in values {
        if v.is_finite() {
            any = true;
            min = min.min(v);
            max = max.max(v);
        }
    }
    any.then_some((min, max))
}

/// Normalize `values` against an externally computed `(min, max)` span.
///
/// - A constant span (min == max exactly) yields `0.5` everywhere: a flat
///   series sits in the middle of its own scale. Any nonzero spread, however
///   tight, is a real scale and normalizes by division.
/// - `None` (no finite raw price existed) yields `0.0` everywhere, the same
///   coercion applied to any other non-finite computation.
/// - Otherwise `(v - min) / (max - min)`, with non-finite results coerced to
///   `0.0`. Values outside the span (a missing price defaulted to `0.0`
///   upstream, say) scale past the `[0, 1]` interval rather than clamping.
#[must_use]
pub fn normalize_against(values: &[f64], span: Option<(f64, f64)>) -> Vec<f64> {
    let Some((min, max)) = span else {
        return vec![0.0; values.len()];
    };
    let range = max - min;
    if !range.is_finite() || range == 0.0 {
        return vec![0.5; values.len()];
    }
    values
        .iter()
        .map(|v| {
            let scaled = (v - min) / range;
            if scaled.is_finite() { scaled } else { 0.0 }
        })
        .collect()
}

/// Min-max normalize a slice against its own span.
#[must_use]
pub fn normalize(values: &[f64]) -> Vec<f64> {
    normalize_against(values, finite_min_max(values.iter().copied()))
}

/// Join per-asset series onto canonical timestamps and min-max normalize each
/// column.
///
/// Each asset's span comes from its FULL raw input series, not the joined
/// subset: dropping or missing a point never shifts an asset's scale. Row
/// timestamps (and hence date labels) come from the first series. Key order
/// in the resulting table follows input order.
///
/// An empty input produces an empty table.
///
/// # Errors
/// Returns `InvalidArg` for duplicate asset codes in `series`, or for
/// mismatched lengths under [`AlignStrategy::ByIndex`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "coinlens_core::analytics::align_and_normalize",
        skip(series),
        fields(series_count = series.len()),
    )
)]
pub fn align_and_normalize(
    series: &[PriceSeries],
    strategy: AlignStrategy,
) -> Result<NormalizedTable, CoinlensError> {
    let mut seen: HashSet<&AssetCode> = HashSet::new();
    for s in series {
        if !seen.insert(&s.asset) {
            return Err(CoinlensError::invalid_arg(format!(
                "duplicate asset code '{}' in input series",
                s.asset
            )));
        }
    }

    if series.is_empty() {
        return Ok(NormalizedTable::empty());
    }

    let frame = align(series, strategy)?;

    let normalized: Vec<Vec<f64>> = series
        .iter()
        .zip(&frame.columns)
        .map(|(s, column)| normalize_against(column, finite_min_max(s.prices())))
        .collect();

    let keys: Vec<AssetCode> = series.iter().map(|s| s.asset.clone()).collect();
    let rows = frame
        .timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| NormalizedRow {
            ts,
            values: keys
                .iter()
                .cloned()
                .zip(normalized.iter().map(|column| column[i]))
                .collect(),
        })
        .collect();

    Ok(NormalizedTable { keys, rows })
}
