mod common;
use coinlens::Coinlens;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Subscriber first, so instrumented refresh spans show up when the
    // `tracing` feature is enabled. Try RUST_LOG=coinlens=trace.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let connector = common::get_connector();
    let lens = Coinlens::builder()
        .with_connector(connector)
        .track_all(&common::tracked())
        .build()?;

    let snapshot = lens.refresh().await?;

    let keys = snapshot.matrix.keys();
    println!("pairwise correlations over {} rows:", snapshot.table.len());
    for (i, a) in keys.iter().enumerate() {
        for b in keys.iter().skip(i + 1) {
            let r = snapshot
                .matrix
                .pair(a, b)
                .expect("pair of matrix axis keys");
            println!("  {a} / {b}: {r:+.4}");
        }
    }

    Ok(())
}
