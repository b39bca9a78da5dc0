use coinlens_core::CoinlensConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn CoinlensConnector> {
    if std::env::var("COINLENS_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(coinlens_mock::MockConnector::new())
    } else {
        Arc::new(
            coinlens_gecko::GeckoConnector::try_default()
                .expect("default CoinGecko client construction"),
        )
    }
}

/// The asset set every example tracks.
#[allow(dead_code)]
pub fn tracked() -> Vec<coinlens_core::Asset> {
    [
        ("bitcoin", "btc"),
        ("ethereum", "eth"),
        ("solana", "sol"),
        ("tether", "usdt"),
    ]
    .into_iter()
    .map(|(id, code)| coinlens_core::Asset::new(id, code).expect("valid static asset"))
    .collect()
}
