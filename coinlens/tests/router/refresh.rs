use std::sync::Arc;
use std::time::Duration;

use coinlens::{
    AlignStrategy, Asset, Coinlens, CoinlensError, DashboardState, SeriesRequest,
};

use crate::helpers::{MockConnector, asset, code, daily_series};

const TOLERANCE: f64 = 1e-9;

/// A connector serving analytically convenient ramps: bitcoin up, ethereum
/// down (pairwise correlation exactly -1), tether flat.
fn ramp_connector() -> Arc<MockConnector> {
    Arc::new(MockConnector {
        name: "ramps",
        series_fn: Some(Arc::new(|a: &Asset, _r: SeriesRequest| {
            let prices: &[f64] = match a.id() {
                "bitcoin" => &[1.0, 2.0, 3.0, 4.0],
                "ethereum" => &[4.0, 3.0, 2.0, 1.0],
                "tether" => &[1.0, 1.0, 1.0, 1.0],
                other => return Err(CoinlensError::not_found(format!("series for {other}"))),
            };
            Ok(daily_series(a.code().as_str(), prices))
        })),
        ..MockConnector::default()
    })
}

#[tokio::test]
async fn refresh_builds_normalized_table_and_matrix() {
    let lens = Coinlens::builder()
        .with_connector(ramp_connector())
        .track(asset("bitcoin", "btc"))
        .track(asset("ethereum", "eth"))
        .build()
        .unwrap();

    let snapshot = lens.refresh().await.unwrap();

    assert_eq!(snapshot.table.keys, vec![code("btc"), code("eth")]);
    assert_eq!(snapshot.table.len(), 4);

    // Min-max normalization maps the extremes to 0 and 1.
    let btc = snapshot.table.column(&code("btc"));
    assert!((btc[0] - 0.0).abs() < TOLERANCE);
    assert!((btc[3] - 1.0).abs() < TOLERANCE);
    assert!(btc.iter().all(|v| (0.0..=1.0).contains(v)));

    // Opposite ramps correlate at exactly -1; the diagonal at 1.
    let r = snapshot.matrix.pair(&code("btc"), &code("eth")).unwrap();
    assert!((r + 1.0).abs() < TOLERANCE, "expected -1, got {r}");
    let d = snapshot.matrix.pair(&code("btc"), &code("btc")).unwrap();
    assert!((d - 1.0).abs() < TOLERANCE, "expected 1, got {d}");
}

#[tokio::test]
async fn refresh_matrix_is_symmetric() {
    let lens = Coinlens::builder()
        .with_connector(ramp_connector())
        .track(asset("bitcoin", "btc"))
        .track(asset("ethereum", "eth"))
        .track(asset("tether", "usdt"))
        .build()
        .unwrap();

    let snapshot = lens.refresh().await.unwrap();
    let keys = [code("btc"), code("eth"), code("usdt")];
    for a in &keys {
        for b in &keys {
            assert_eq!(
                snapshot.matrix.pair(a, b),
                snapshot.matrix.pair(b, a),
                "matrix[{a}][{b}] != matrix[{b}][{a}]"
            );
        }
    }
}

#[tokio::test]
async fn constant_series_sits_at_half_and_correlates_at_zero() {
    let lens = Coinlens::builder()
        .with_connector(ramp_connector())
        .track(asset("bitcoin", "btc"))
        .track(asset("tether", "usdt"))
        .build()
        .unwrap();

    let snapshot = lens.refresh().await.unwrap();

    let usdt = snapshot.table.column(&code("usdt"));
    assert_eq!(usdt, vec![0.5; 4]);

    // Zero variance: no correlation with anything, the diagonal included.
    assert_eq!(snapshot.matrix.pair(&code("usdt"), &code("btc")), Some(0.0));
    assert_eq!(snapshot.matrix.pair(&code("usdt"), &code("usdt")), Some(0.0));
}

#[tokio::test]
async fn refresh_is_all_or_nothing() {
    let lens = Coinlens::builder()
        .with_connector(ramp_connector())
        .track(asset("bitcoin", "btc"))
        .track(asset("dogecoin", "doge"))
        .build()
        .unwrap();

    // dogecoin has no fixture; the whole refresh aborts, bitcoin's success
    // notwithstanding.
    let err = lens.refresh().await.unwrap_err();
    match err {
        CoinlensError::NotFound { what } => assert_eq!(what, "series for doge"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn refresh_state_maps_outcomes() {
    let lens = Coinlens::builder()
        .with_connector(ramp_connector())
        .track(asset("bitcoin", "btc"))
        .build()
        .unwrap();
    let state = lens.refresh_state().await;
    assert!(state.is_ready());
    assert_eq!(state.ready().unwrap().table.len(), 4);

    let failing = Coinlens::builder()
        .with_connector(ramp_connector())
        .track(asset("dogecoin", "doge"))
        .build()
        .unwrap();
    let state = failing.refresh_state().await;
    assert!(state.is_failed());
    assert!(matches!(
        state.error(),
        Some(CoinlensError::NotFound { .. })
    ));

    assert!(DashboardState::default().is_loading());
}

#[tokio::test]
async fn request_deadline_bounds_the_fanout() {
    let slow = Arc::new(MockConnector {
        name: "slow",
        delay_ms: 100,
        series: Some(daily_series("btc", &[1.0, 2.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(slow)
        .track(asset("bitcoin", "btc"))
        .request_timeout(Duration::from_millis(10))
        .build()
        .unwrap();

    let err = lens.refresh().await.unwrap_err();
    match err {
        CoinlensError::RequestTimeout { capability } => assert_eq!(capability, "refresh"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn empty_tracked_set_yields_empty_snapshot() {
    let lens = Coinlens::builder()
        .with_connector(ramp_connector())
        .build()
        .unwrap();

    let snapshot = lens.refresh().await.unwrap();
    assert!(snapshot.table.is_empty());
    assert!(snapshot.matrix.is_empty());
}

#[tokio::test]
async fn ragged_series_fail_refresh_under_index_alignment() {
    let ragged = Arc::new(MockConnector {
        name: "ragged",
        series_fn: Some(Arc::new(|a: &Asset, _r: SeriesRequest| {
            let prices: &[f64] = match a.id() {
                "bitcoin" => &[1.0, 2.0, 3.0],
                _ => &[1.0, 2.0],
            };
            Ok(daily_series(a.code().as_str(), prices))
        })),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(ragged)
        .track(asset("bitcoin", "btc"))
        .track(asset("ethereum", "eth"))
        .align_strategy(AlignStrategy::ByIndex)
        .build()
        .unwrap();

    let err = lens.refresh().await.unwrap_err();
    assert!(matches!(err, CoinlensError::InvalidArg(_)));
}

#[tokio::test]
async fn ragged_series_survive_timestamp_alignment() {
    let ragged = Arc::new(MockConnector {
        name: "ragged",
        series_fn: Some(Arc::new(|a: &Asset, _r: SeriesRequest| {
            let prices: &[f64] = match a.id() {
                "bitcoin" => &[1.0, 2.0, 3.0],
                // Missing the trailing day; that row defaults to raw 0.0.
                _ => &[6.0, 4.0],
            };
            Ok(daily_series(a.code().as_str(), prices))
        })),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(ragged)
        .track(asset("bitcoin", "btc"))
        .track(asset("ethereum", "eth"))
        .build()
        .unwrap();

    let snapshot = lens.refresh().await.unwrap();
    assert_eq!(snapshot.table.len(), 3);
    // eth spans raw [4, 6]; day 0 -> 1.0, day 1 -> 0.0, missing day 2 -> raw
    // 0.0 which scales past the unit interval to -2.0.
    let eth = snapshot.table.column(&code("eth"));
    assert!((eth[0] - 1.0).abs() < TOLERANCE);
    assert!((eth[1] - 0.0).abs() < TOLERANCE);
    assert!((eth[2] + 2.0).abs() < TOLERANCE);
}
