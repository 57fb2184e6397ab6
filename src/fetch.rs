use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use url::Url;

/// Retrieves the raw markup behind a URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// `Fetch` over HTTP with the crate's default headers.
///
/// One GET per call, no retries. A non-success status is an error.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .default_headers(crate::build_headers(user_agent)?)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        tracing::debug!(%url, "fetching");
        let webpage = self
            .client
            .get(url.to_owned())
            .send()
            .await?
            .error_for_status()?;
        let body = webpage.text().await?;
        tracing::debug!(%url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
