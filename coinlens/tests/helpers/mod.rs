
pub use mock_connector::MockConnector;

use coinlens_core::{Asset, AssetCode, PricePoint, PriceSeries};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Construct a UTC `DateTime` from a day offset for readability in tests.
/// Day zero is 2025-01-01T00:00:00Z; fixtures step one day per point.
pub fn day(offset: i64) -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone;
    chrono::Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(offset)
}

/// Construct an `Asset` for test usage with infallible expectations.
pub fn asset(id: &str, code: &str) -> Asset {
    Asset::new(id, code).expect("valid static test asset")
}

/// Construct an `AssetCode` for test usage with infallible expectations.
pub fn code(code: &str) -> AssetCode {
    AssetCode::new(code).expect("valid static test code")
}

/// Build a daily series starting at [`day`]`(0)` from a list of prices.
pub fn daily_series(asset_code: &str, prices: &[f64]) -> PriceSeries {
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            ts: day(i64::try_from(i).expect("small test index")),
            price,
        })
        .collect();
    PriceSeries::new(code(asset_code), points)
}
