use eyre::{bail, Result};
use technolife_scraper::{run, Config, HttpFetcher};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let outcome = run(&config, &fetcher).await?;

    for record in &outcome.stored {
        println!("{record}");
    }

    if !outcome.writes.is_clean() {
        bail!(
            "{} of {} writes failed",
            outcome.writes.failed.len(),
            outcome.writes.failed.len() + outcome.writes.inserted.len()
        );
    }
    Ok(())
}
