use std::path::Path;
use std::time::Duration;

use eyre::{Result, WrapErr};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::{ProductRecord, ScrapeError};

/// How long a queued write waits for the shared connection. Writes queue
/// behind each other on one connection, so this covers the whole batch.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS mobiles (name TEXT PRIMARY KEY, price TEXT)";

/// SQLite table of phone prices keyed by name.
///
/// The pool holds a single connection, so concurrent callers share one
/// session and their statements run one at a time.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// `mobiles` table exists.
    ///
    /// The parent directory is created when missing, one level only.
    pub async fn open(path: &Path) -> Result<Self> {
        ensure_parent_dir(path).await?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .wrap_err_with(|| format!("failed to open database at {}", path.display()))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        tracing::debug!(path = %path.display(), "database ready");
        Ok(store)
    }

    /// Creates the `mobiles` table if it does not exist yet. Safe to call
    /// any number of times.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts a record. Existing rows are never overwritten: a name that is
    /// already stored fails with `ScrapeError::DuplicateName`.
    pub async fn insert(&self, record: &ProductRecord) -> Result<(), ScrapeError> {
        sqlx::query("INSERT INTO mobiles (name, price) VALUES (?, ?)")
            .bind(&record.name)
            .bind(&record.price)
            .execute(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    ScrapeError::DuplicateName(record.name.clone())
                }
                source => ScrapeError::WriteFailed {
                    name: record.name.clone(),
                    source,
                },
            })?;
        Ok(())
    }

    /// Price stored under `name`, if any.
    pub async fn price_of(&self, name: &str) -> Result<Option<String>> {
        let price = sqlx::query_scalar::<_, String>("SELECT price FROM mobiles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(price)
    }

    /// Every stored row, in whatever order SQLite scans them.
    pub async fn all(&self) -> Result<Vec<ProductRecord>> {
        let rows = sqlx::query_as::<_, ProductRecord>("SELECT name, price FROM mobiles")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::try_exists(parent).await? {
        return Ok(());
    }
    tokio::fs::create_dir(parent)
        .await
        .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    tracing::info!(dir = %parent.display(), "created database directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn insert_then_read_back() -> Result<()> {
        let dir = tempdir()?;
        let store = ProductStore::open(&dir.path().join("prices.db")).await?;

        store.insert(&ProductRecord::new("Galaxy A54", "15,499,000")).await?;

        assert_eq!(
            store.price_of("Galaxy A54").await?.as_deref(),
            Some("15,499,000")
        );
        assert_eq!(store.price_of("missing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_fails_and_keeps_old_price() -> Result<()> {
        let dir = tempdir()?;
        let store = ProductStore::open(&dir.path().join("prices.db")).await?;
        store.insert(&ProductRecord::new("X", "1")).await?;

        let err = store.insert(&ProductRecord::new("X", "2")).await.unwrap_err();

        assert!(matches!(err, ScrapeError::DuplicateName(ref name) if name == "X"));
        assert_eq!(store.price_of("X").await?.as_deref(), Some("1"));
        assert_eq!(store.all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn schema_creation_is_repeatable() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("prices.db");
        let store = ProductStore::open(&path).await?;
        store.insert(&ProductRecord::new("X", "1")).await?;
        store.ensure_schema().await?;
        drop(store);

        let reopened = ProductStore::open(&path).await?;
        assert_eq!(reopened.all().await?, [ProductRecord::new("X", "1")]);
        Ok(())
    }

    #[tokio::test]
    async fn queued_writes_wait_for_the_connection() -> Result<()> {
        let dir = tempdir()?;
        let store = ProductStore::open(&dir.path().join("prices.db")).await?;

        assert_eq!(store.pool.options().get_max_connections(), 1);
        assert_eq!(store.pool.options().get_acquire_timeout(), ACQUIRE_TIMEOUT);
        Ok(())
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Database").join("prices.db");

        ProductStore::open(&path).await?;

        assert!(path.parent().unwrap().is_dir());
        assert!(path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn does_not_create_missing_ancestors() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("a").join("b").join("prices.db");

        assert!(ProductStore::open(&path).await.is_err());
        assert!(!dir.path().join("a").exists());
        Ok(())
    }
}
