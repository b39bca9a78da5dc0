//! Series alignment: join per-asset observations into a rectangular frame.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::{AlignStrategy, CoinlensError, PricePoint, PriceSeries};

/// Raw prices joined onto canonical timestamps, one column per input series.
///
/// Missing entries are already defaulted to `0.0`: a price absent at an
/// instant is worth nothing downstream, it does not abort the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFrame {
    /// Canonical timestamps, taken from the first input series.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Raw price columns in input-series order, each `timestamps.len()` long.
    pub columns: Vec<Vec<f64>>,
}

impl AlignedFrame {
    /// Frame with no timestamps and no columns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            columns: Vec::new(),
        }
    }
}

/// Join `series` onto the first series' timestamps using `strategy`.
///
/// # Errors
/// Returns `InvalidArg` under [`AlignStrategy::ByIndex`] when series lengths
/// differ; a positional join of ragged input would silently pair unrelated
/// observations.
pub fn align(
    series: &[PriceSeries],
    strategy: AlignStrategy,
) -> Result<AlignedFrame, CoinlensError> {
    if series.is_empty() {
        return Ok(AlignedFrame::empty());
    }
    match strategy {
        AlignStrategy::ByIndex => align_by_index(series),
        AlignStrategy::ByTimestamp { tolerance } => Ok(align_by_timestamp(series, tolerance)),
        _ => Err(CoinlensError::invalid_arg(
            "unknown alignment strategy".to_string(),
        )),
    }
}

fn align_by_index(series: &[PriceSeries]) -> Result<AlignedFrame, CoinlensError> {
    let rows = series[0].len();
    if let Some(s) = series.iter().find(|s| s.len() != rows) {
        return Err(CoinlensError::invalid_arg(format!(
            "series for '{}' has {} points but the canonical series has {rows}; \
             index alignment requires equal lengths",
            s.asset,
            s.len(),
        )));
    }
    let timestamps = series[0].points.iter().map(|p| p.ts).collect();
    let columns = series
        .iter()
        .map(|s| s.prices().collect())
        .collect();
    Ok(AlignedFrame {
        timestamps,
        columns,
    })
}

fn align_by_timestamp(series: &[PriceSeries], tolerance: Duration) -> AlignedFrame {
    let tolerance = TimeDelta::from_std(tolerance).unwrap_or(TimeDelta::MAX);

    let canonical = sorted_points(&series[0]);
    let timestamps: Vec<DateTime<Utc>> = canonical.iter().map(|p| p.ts).collect();

    let mut columns = Vec::with_capacity(series.len());
    columns.push(canonical.iter().map(|p| p.price).collect());
    for s in &series[1..] {
        let points = sorted_points(s);
        let column = timestamps
            .iter()
            .map(|&ts| nearest_within(&points, ts, tolerance).unwrap_or(0.0))
            .collect();
        columns.push(column);
    }

    AlignedFrame {
        timestamps,
        columns,
    }
}

/// `nearest_within` requires ascending points; providers are not trusted to
/// deliver them sorted.
fn sorted_points(series: &PriceSeries) -> Vec<PricePoint> {
    let mut points = series.points.clone();
    points.sort_by_key(|p| p.ts);
    points
}

/// The price of the observation nearest to `ts`, if within `tolerance`.
///
/// Exact matches win trivially; an equidistant pair resolves to the earlier
/// point. `points` must be sorted ascending.
fn nearest_within(points: &[PricePoint], ts: DateTime<Utc>, tolerance: TimeDelta) -> Option<f64> {
    let idx = points.partition_point(|p| p.ts < ts);
    let after = points.get(idx);
    let before = idx.checked_sub(1).and_then(|i| points.get(i));

    let candidate = match (before, after) {
        (Some(b), Some(a)) => {
            let db = ts.signed_duration_since(b.ts);
            let da = a.ts.signed_duration_since(ts);
            if db <= da { b } else { a }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };

    let distance = candidate.ts.signed_duration_since(ts).abs();
    (distance <= tolerance).then_some(candidate.price)
}
