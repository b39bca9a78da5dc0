//! Pairwise Pearson correlation over normalized columns.

use crate::types::{CorrelationMatrix, NormalizedTable};

/// Pearson correlation coefficient of two samples, paired index-wise.
///
/// Uses the single-pass sum formulation. Degenerate inputs yield `0.0`
/// rather than `NaN`: empty samples, a zero-variance side, or a non-finite
/// intermediate all collapse to no correlation. Trailing values on the
/// longer side are ignored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let len = x.len().min(y.len());
    if len == 0 {
        return 0.0;
    }
    let n = len as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_xx += a * a;
        sum_yy += b * b;
    }

    let cov = sum_xy - sum_x * sum_y / n;
    let var_x = sum_xx - sum_x * sum_x / n;
    let var_y = sum_yy - sum_y * sum_y / n;
    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    let r = cov / denom;
    if r.is_finite() { r } else { 0.0 }
}

/// Correlate every pair of columns in `table`.
///
/// The result is symmetric by construction: each pair is computed once and
/// mirrored. The diagonal goes through the same formula as everything else,
/// so a constant column reads `0.0` against every column, itself included.
/// Key order follows the table.
#[must_use]
pub fn correlation_matrix(table: &NormalizedTable) -> CorrelationMatrix {
    let keys = table.keys.clone();
    let columns: Vec<Vec<f64>> = keys.iter().map(|k| table.column(k)).collect();

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix::from_rows(keys, values).unwrap_or_default()
}
