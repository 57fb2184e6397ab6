use eyre::{eyre, Result};
use tokio::task::JoinSet;

use crate::listing::pair;
use crate::{ProductRecord, ProductStore, ScrapeError};

#[derive(Debug, Default)]
/// Outcome of every write issued by `persist_all`.
pub struct WriteReport {
    /// Records written successfully, in completion order.
    pub inserted: Vec<ProductRecord>,
    /// Records whose write failed, with the reason.
    pub failed: Vec<(ProductRecord, ScrapeError)>,
}

impl WriteReport {
    /// `true` when no write failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes `names[i]`/`prices[i]` pairs into `store`, one concurrent task per
/// pair, and waits for all of them.
///
/// Unequal lengths fail with `ScrapeError::LengthMismatch` before anything is
/// written. A failed write does not stop its siblings; it is logged and
/// recorded in the returned report.
pub async fn persist_all(
    store: &ProductStore,
    names: &[String],
    prices: &[String],
) -> Result<WriteReport> {
    let records = pair(names, prices)?;
    store.ensure_schema().await?;

    let mut tasks = JoinSet::new();
    for record in records {
        let store = store.clone();
        tasks.spawn(async move {
            let outcome = store.insert(&record).await;
            (record, outcome)
        });
    }
    tracing::info!(writes = tasks.len(), "persistence in flight");

    let mut report = WriteReport::default();
    while let Some(joined) = tasks.join_next().await {
        let (record, outcome) = joined.map_err(|err| eyre!("write task failed: {err}"))?;
        match outcome {
            Ok(()) => report.inserted.push(record),
            Err(err) => {
                tracing::warn!(name = %record.name, error = %err, "write failed");
                report.failed.push((record, err));
            }
        }
    }

    tracing::info!(
        inserted = report.inserted.len(),
        failed = report.failed.len(),
        "persistence finished"
    );
    Ok(report)
}
