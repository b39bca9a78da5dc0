mod common;
use coinlens::{Coinlens, TextRenderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create connector (mock in CI when COINLENS_EXAMPLES_USE_MOCK is set).
    let connector = common::get_connector();

    // 2. Build the orchestrator with the tracked asset set.
    let lens = Coinlens::builder()
        .with_connector(connector)
        .track_all(&common::tracked())
        .build()?;

    // 3. Refresh: fan-out fetch, align, normalize, correlate. The state is
    //    Ready or Failed; partial data never leaks through.
    println!("Refreshing dashboard...");
    let state = lens.refresh_state().await;

    // 4. Render whatever the state holds to stdout.
    let mut renderer = TextRenderer::new(std::io::stdout());
    lens.render(&mut renderer, &state)?;

    Ok(())
}
