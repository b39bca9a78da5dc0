use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use coinlens::{Asset, Coinlens, CoinlensError, QuoteCurrency};

use crate::helpers::{MockConnector, asset, code};

fn prices(entries: &[(&str, f64)]) -> BTreeMap<coinlens::AssetCode, f64> {
    entries.iter().map(|(c, p)| (code(c), *p)).collect()
}

#[tokio::test]
async fn spot_returns_prices_for_the_tracked_set() {
    let c = Arc::new(MockConnector {
        name: "spotter",
        spot: Some(prices(&[("btc", 57_000.0), ("eth", 1_100.0)])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(c)
        .track(asset("bitcoin", "btc"))
        .track(asset("ethereum", "eth"))
        .build()
        .unwrap();

    let report = lens.spot().await.unwrap();
    assert!(report.is_complete());
    let resp = report.response.unwrap();
    assert_eq!(resp.quote, QuoteCurrency::Usd);
    assert_eq!(resp.prices.get(&code("btc")), Some(&57_000.0));
}

#[tokio::test]
async fn missing_assets_become_warnings_not_failures() {
    let c = Arc::new(MockConnector {
        name: "partial",
        spot: Some(prices(&[("btc", 57_000.0)])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(c)
        .track(asset("bitcoin", "btc"))
        .track(asset("ethereum", "eth"))
        .build()
        .unwrap();

    let report = lens.spot().await.unwrap();
    assert!(!report.is_complete());
    assert!(report.response.is_some());
    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        CoinlensError::NotFound { what } => assert_eq!(what, "spot for eth"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn spot_falls_back_to_the_next_provider() {
    let failing = Arc::new(MockConnector {
        name: "down",
        spot_fn: Some(Arc::new(|_a: &[Asset], _q: QuoteCurrency| {
            Err(CoinlensError::Other("wire cut".into()))
        })),
        ..MockConnector::default()
    });
    let ok = Arc::new(MockConnector {
        name: "up",
        spot: Some(prices(&[("btc", 57_000.0)])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(failing)
        .with_connector(ok)
        .track(asset("bitcoin", "btc"))
        .build()
        .unwrap();

    let report = lens.spot().await.unwrap();
    assert!(report.is_complete());
}

#[tokio::test]
async fn spot_without_any_provider_is_unsupported() {
    // Series capability only, no spot.
    let c = Arc::new(MockConnector {
        name: "series_only",
        series: Some(crate::helpers::daily_series("btc", &[1.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(c)
        .track(asset("bitcoin", "btc"))
        .build()
        .unwrap();

    let err = lens.spot().await.unwrap_err();
    assert!(matches!(err, CoinlensError::Unsupported { .. }));
}

#[tokio::test]
async fn spot_aggregates_when_every_provider_fails() {
    let failing = |name: &'static str| {
        Arc::new(MockConnector {
            name,
            spot_fn: Some(Arc::new(|_a: &[Asset], _q: QuoteCurrency| {
                Err(CoinlensError::Other("boom".into()))
            })),
            ..MockConnector::default()
        })
    };

    let lens = Coinlens::builder()
        .with_connector(failing("p1"))
        .with_connector(failing("p2"))
        .track(asset("bitcoin", "btc"))
        .build()
        .unwrap();

    let err = lens.spot().await.unwrap_err();
    match err {
        CoinlensError::AllProvidersFailed(errors) => assert_eq!(errors.len(), 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn spot_honors_the_request_deadline() {
    let slow = Arc::new(MockConnector {
        name: "slow",
        delay_ms: 100,
        spot: Some(prices(&[("btc", 57_000.0)])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(slow)
        .track(asset("bitcoin", "btc"))
        .request_timeout(Duration::from_millis(10))
        .build()
        .unwrap();

    let err = lens.spot().await.unwrap_err();
    match err {
        CoinlensError::RequestTimeout { capability } => assert_eq!(capability, "spot"),
        other => panic!("unexpected: {other:?}"),
    }
}
