mod common;
use coinlens::Coinlens;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connector = common::get_connector();
    let lens = Coinlens::builder()
        .with_connector(connector)
        .track_all(&common::tracked())
        .build()?;

    let report = lens.spot().await?;

    if let Some(resp) = report.response {
        println!("latest prices ({}):", resp.quote);
        for (code, price) in resp.prices {
            println!("  {code}: {price}");
        }
    } else {
        eprintln!("no prices returned");
    }

    if !report.warnings.is_empty() {
        eprintln!("warnings:");
        for w in report.warnings {
            eprintln!("- {w}");
        }
    }

    Ok(())
}
