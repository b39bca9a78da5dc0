//! Wire-format DTOs for the CoinGecko REST API.

use std::collections::BTreeMap;

use chrono::DateTime;
use coinlens_core::{AssetCode, CoinlensError, PricePoint, PriceSeries};
use serde::Deserialize;

/// Body of `/coins/{id}/market_chart`. Entries are `[unix_millis, value]`
/// pairs; sibling arrays (market caps, volumes) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct MarketChartResponse {
    pub prices: Vec<(i64, Option<f64>)>,
}

impl MarketChartResponse {
    /// Convert wire pairs into a [`PriceSeries`] keyed by `code`.
    ///
    /// A `null` price becomes `NaN`, which the normalization pipeline later
    /// coerces to zero. An out-of-range timestamp is a data error: it means
    /// the body was not the expected millisecond epoch format.
    pub(crate) fn into_series(self, code: AssetCode) -> Result<PriceSeries, CoinlensError> {
        let mut points = Vec::with_capacity(self.prices.len());
        for (ms, price) in self.prices {
            let ts = DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                CoinlensError::data(format!("timestamp {ms}ms out of range for '{code}'"))
            })?;
            points.push(PricePoint {
                ts,
                price: price.unwrap_or(f64::NAN),
            });
        }
        Ok(PriceSeries::new(code, points))
    }
}

/// Body of `/simple/price`: asset id to `{ currency: price }`.
pub(crate) type SimplePriceResponse = BTreeMap<String, BTreeMap<String, f64>>;
