use std::fmt;

use eyre::Result;
use url::Url;

use crate::{
    extract_listings, persist_all, resolve_category, Config, Fetch, ProductRecord, ProductStore,
    WriteReport,
};

/// Where a run currently is. A failing stage ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    CategoryResolved,
    ListingsExtracted,
    PersistenceInFlight,
    Verified,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::CategoryResolved => "category resolved",
            Stage::ListingsExtracted => "listings extracted",
            Stage::PersistenceInFlight => "persistence in flight",
            Stage::Verified => "verified",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
/// Result of a run that reached `Stage::Verified`.
pub struct RunOutcome {
    /// The category page the listings were scraped from.
    pub category_url: Url,
    /// What happened to each write.
    pub writes: WriteReport,
    /// Full table contents after all writes finished.
    pub stored: Vec<ProductRecord>,
}

/// Runs the whole scrape: resolve the category, extract its listings,
/// persist them concurrently and read the table back.
pub async fn run(config: &Config, fetcher: &dyn Fetch) -> Result<RunOutcome> {
    let mut stage = Stage::Idle;
    tracing::info!(%stage, root = %config.root_url);

    let root_url = Url::parse(&config.root_url)?;
    let category_url = resolve_category(fetcher, &root_url, &config.markers.category_label).await?;
    advance(&mut stage, Stage::CategoryResolved);

    let listings = extract_listings(fetcher, &category_url, &config.markers).await?;
    // Unpaired listings must fail before the database directory is touched.
    let pending = listings.records()?.len();
    advance(&mut stage, Stage::ListingsExtracted);
    tracing::info!(records = pending, "listings paired");

    let store = ProductStore::open(&config.database_path).await?;
    advance(&mut stage, Stage::PersistenceInFlight);
    let writes = persist_all(&store, &listings.names, &listings.prices).await?;

    let stored = store.all().await?;
    advance(&mut stage, Stage::Verified);
    tracing::info!(rows = stored.len(), "table read back");

    Ok(RunOutcome {
        category_url,
        writes,
        stored,
    })
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::info!(from = %stage, to = %next, "stage");
    *stage = next;
}
