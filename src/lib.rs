//! Scrape mobile phone names and prices from Technolife into SQLite.
//!
//! The pipeline has three stages: `resolve_category` finds the mobile
//! phones listing from the site root, `extract_listings` collects names
//! and prices from that listing, and `persist_all` writes every pair
//! concurrently into a `ProductStore` before the table is read back.
//!
//! Feature Flags:
//! - `serde`: Enables serde support for the structs. (default)

mod category;
mod config;
mod error;
mod fetch;
mod listing;
mod pipeline;
mod storage;

use header::{HeaderMap, HeaderValue};
use reqwest::header;

pub use category::resolve_category;
pub use config::{Config, Markers};
pub use error::ScrapeError;
pub use fetch::{Fetch, HttpFetcher};
pub use listing::{extract_listings, sanitize_name, Listings, ProductRecord};
pub use pipeline::{run, RunOutcome, Stage};
pub use storage::{persist_all, ProductStore, WriteReport};
pub use url::Url;

/// Builds the default headers for the client.
fn build_headers(user_agent: &str) -> eyre::Result<HeaderMap> {
    if user_agent.trim().is_empty() {
        return Err(ScrapeError::EmptyUserAgent.into());
    }
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_str(user_agent)?);
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("fa-IR,fa;q=0.9,en-US;q=0.5"),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    Ok(headers)
}
