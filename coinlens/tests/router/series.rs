use std::sync::Arc;
use std::time::Duration;

use coinlens::{Asset, Coinlens, CoinlensError, FetchStrategy, QuoteCurrency, SeriesRequest};

use crate::helpers::{MockConnector, asset, code, daily_series};

#[tokio::test]
async fn strategy_latency_returns_fastest_success() {
    let fast_ok = Arc::new(MockConnector {
        name: "fast",
        delay_ms: 10,
        series: Some(daily_series("btc", &[11.0, 12.0])),
        ..MockConnector::default()
    });
    let slow_ok = Arc::new(MockConnector {
        name: "slow",
        delay_ms: 100,
        series: Some(daily_series("btc", &[99.0, 98.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(slow_ok)
        .with_connector(fast_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let s = lens.series(&asset("bitcoin", "btc")).await.unwrap();
    assert_eq!(s.points[0].price, 11.0);
}

#[tokio::test]
async fn strategy_latency_ignores_faster_failure_and_returns_first_success() {
    // Fail immediately faster than the successful provider
    let fast_fail = Arc::new(MockConnector {
        name: "fast_fail",
        delay_ms: 5,
        series_fn: Some(Arc::new(|_a: &Asset, _r: SeriesRequest| {
            Err(CoinlensError::Other("boom".into()))
        })),
        ..MockConnector::default()
    });
    let slow_ok = Arc::new(MockConnector {
        name: "slow_ok",
        delay_ms: 20,
        series: Some(daily_series("btc", &[77.0, 78.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(fast_fail)
        .with_connector(slow_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let s = lens.series(&asset("bitcoin", "btc")).await.unwrap();
    assert_eq!(s.points[0].price, 77.0);
}

#[tokio::test]
async fn strategy_priority_with_fallback_obeys_order_and_timeout() {
    // First connector times out beyond configured threshold; second succeeds
    let very_slow = Arc::new(MockConnector {
        name: "first",
        delay_ms: 200,
        series: Some(daily_series("btc", &[1000.0, 1001.0])),
        ..MockConnector::default()
    });
    let ok = Arc::new(MockConnector {
        name: "second",
        delay_ms: 10,
        series: Some(daily_series("btc", &[42.0, 43.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(very_slow)
        .with_connector(ok)
        .fetch_strategy(FetchStrategy::PriorityWithFallback)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let s = lens.series(&asset("bitcoin", "btc")).await.unwrap();
    assert_eq!(s.points[0].price, 42.0);
}

#[tokio::test]
async fn per_asset_priority_is_applied() {
    let low = Arc::new(MockConnector {
        name: "low",
        series: Some(daily_series("btc", &[1.0, 2.0])),
        ..MockConnector::default()
    });
    let high = Arc::new(MockConnector {
        name: "high",
        series: Some(daily_series("btc", &[9.0, 8.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(low.clone())
        .with_connector(high.clone())
        .prefer_for_asset(code("btc"), &[high, low])
        .build()
        .unwrap();

    let s = lens.series(&asset("bitcoin", "btc")).await.unwrap();
    assert_eq!(s.points[0].price, 9.0);
}

#[tokio::test]
async fn priority_for_other_asset_leaves_registration_order() {
    let low = Arc::new(MockConnector {
        name: "low",
        series: Some(daily_series("btc", &[1.0, 2.0])),
        ..MockConnector::default()
    });
    let high = Arc::new(MockConnector {
        name: "high",
        series: Some(daily_series("btc", &[9.0, 8.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(low.clone())
        .with_connector(high.clone())
        .prefer_for_asset(code("eth"), &[high, low])
        .build()
        .unwrap();

    let s = lens.series(&asset("bitcoin", "btc")).await.unwrap();
    assert_eq!(s.points[0].price, 1.0);
}

#[tokio::test]
async fn connector_without_configured_quote_is_skipped() {
    let usd_only = Arc::new(MockConnector {
        name: "usd_only",
        supported_quotes: &[QuoteCurrency::Usd],
        series: Some(daily_series("btc", &[1.0, 2.0])),
        ..MockConnector::default()
    });
    let multi = Arc::new(MockConnector {
        name: "multi",
        supported_quotes: &[QuoteCurrency::Usd, QuoteCurrency::Eur],
        series: Some(daily_series("btc", &[5.0, 6.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(usd_only)
        .with_connector(multi)
        .quote_currency(QuoteCurrency::Eur)
        .build()
        .unwrap();

    let s = lens.series(&asset("bitcoin", "btc")).await.unwrap();
    assert_eq!(s.points[0].price, 5.0);
}

#[tokio::test]
async fn no_connector_with_configured_quote_is_unsupported() {
    let usd_only = Arc::new(MockConnector {
        name: "usd_only",
        supported_quotes: &[QuoteCurrency::Usd],
        series: Some(daily_series("btc", &[1.0, 2.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(usd_only)
        .quote_currency(QuoteCurrency::Eur)
        .build()
        .unwrap();

    let err = lens.series(&asset("bitcoin", "btc")).await.unwrap_err();
    assert!(matches!(err, CoinlensError::Unsupported { .. }));
}

#[tokio::test]
async fn unclaimed_asset_is_unsupported() {
    let narrow = Arc::new(MockConnector {
        name: "narrow",
        asset_ids_ok: Some(&["bitcoin"]),
        series: Some(daily_series("btc", &[1.0, 2.0])),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder().with_connector(narrow).build().unwrap();

    let err = lens.series(&asset("dogecoin", "doge")).await.unwrap_err();
    assert!(matches!(err, CoinlensError::Unsupported { .. }));
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let nf = |name: &'static str| {
        Arc::new(MockConnector {
            name,
            series_fn: Some(Arc::new(|a: &Asset, _r: SeriesRequest| {
                Err(CoinlensError::not_found(format!("series for {}", a.id())))
            })),
            ..MockConnector::default()
        })
    };

    let lens = Coinlens::builder()
        .with_connector(nf("p1"))
        .with_connector(nf("p2"))
        .build()
        .unwrap();

    let err = lens.series(&asset("bitcoin", "btc")).await.unwrap_err();
    match err {
        CoinlensError::NotFound { what } => assert_eq!(what, "series for btc"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn all_timeouts_collapse_to_all_providers_timed_out() {
    let slow = |name: &'static str| {
        Arc::new(MockConnector {
            name,
            delay_ms: 100,
            series: Some(daily_series("btc", &[1.0, 2.0])),
            ..MockConnector::default()
        })
    };

    let lens = Coinlens::builder()
        .with_connector(slow("p1"))
        .with_connector(slow("p2"))
        .provider_timeout(Duration::from_millis(10))
        .build()
        .unwrap();

    let err = lens.series(&asset("bitcoin", "btc")).await.unwrap_err();
    assert!(matches!(err, CoinlensError::AllProvidersTimedOut { .. }));
}

#[tokio::test]
async fn mixed_failures_aggregate_with_connector_tagging() {
    let fail = Arc::new(MockConnector {
        name: "boomer",
        series_fn: Some(Arc::new(|_a: &Asset, _r: SeriesRequest| {
            Err(CoinlensError::Other("boom".into()))
        })),
        ..MockConnector::default()
    });
    let nf = Arc::new(MockConnector {
        name: "nf",
        series_fn: Some(Arc::new(|_a: &Asset, _r: SeriesRequest| Err(CoinlensError::not_found("x")))),
        ..MockConnector::default()
    });

    let lens = Coinlens::builder()
        .with_connector(fail)
        .with_connector(nf)
        .build()
        .unwrap();

    let err = lens.series(&asset("bitcoin", "btc")).await.unwrap_err();
    match err {
        CoinlensError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| matches!(
                e,
                CoinlensError::Connector { connector, .. } if connector == "boomer"
            )));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn build_rejects_empty_connector_set() {
    let err = Coinlens::builder().build().err().unwrap();
    assert!(matches!(err, CoinlensError::InvalidArg(_)));
}

#[tokio::test]
async fn build_rejects_duplicate_tracked_codes() {
    let c = Arc::new(MockConnector {
        series: Some(daily_series("btc", &[1.0])),
        ..MockConnector::default()
    });
    let err = Coinlens::builder()
        .with_connector(c)
        .track(asset("bitcoin", "btc"))
        .track(asset("wrapped-bitcoin", "btc"))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, CoinlensError::InvalidArg(_)));
}
