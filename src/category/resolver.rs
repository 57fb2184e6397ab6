use eyre::Result;
use scraper::{Html, Selector};
use url::Url;

use crate::{Fetch, ScrapeError};

/// Finds the URL of the category page labelled `label` on the site root.
///
/// The root page is fetched once. The first anchor whose text is exactly
/// `label` and that carries an `href` wins; the `href` is resolved against
/// `root_url`.
pub async fn resolve_category(fetcher: &dyn Fetch, root_url: &Url, label: &str) -> Result<Url> {
    let body = fetcher.fetch(root_url).await?;
    let category_url = find_category_link(root_url, &body, label)?;
    tracing::info!(%category_url, "category resolved");
    Ok(category_url)
}

pub(crate) fn find_category_link(root_url: &Url, body: &str, label: &str) -> Result<Url> {
    let link_selector = &Selector::parse("a").unwrap();
    let document = Html::parse_document(body);

    let href = document
        .select(link_selector)
        .filter(|link| link.text().collect::<String>() == label)
        .find_map(|link| link.value().attr("href"));

    match href {
        Some(href) => Ok(root_url.join(href)?),
        None => Err(ScrapeError::CategoryNotFound {
            url: root_url.to_string(),
            label: label.into(),
        }
        .into()),
    }
}
