use eyre::Result;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{Fetch, Markers, ProductRecord, ScrapeError};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Names and prices scraped from a category page, in document order.
///
/// The two sequences come from independent scans and are related only by
/// position. Use `Listings::records` to pair them.
pub struct Listings {
    /// Product names, tabs removed.
    pub names: Vec<String>,
    /// Product prices, untouched.
    pub prices: Vec<String>,
}

impl Listings {
    /// Pairs `names[i]` with `prices[i]`.
    ///
    /// Fails with `ScrapeError::LengthMismatch` instead of truncating when
    /// the sequences differ in length.
    pub fn records(&self) -> Result<Vec<ProductRecord>> {
        pair(&self.names, &self.prices)
    }
}

pub(crate) fn pair(names: &[String], prices: &[String]) -> Result<Vec<ProductRecord>> {
    if names.len() != prices.len() {
        return Err(ScrapeError::LengthMismatch {
            names: names.len(),
            prices: prices.len(),
        }
        .into());
    }
    Ok(names
        .iter()
        .zip(prices)
        .map(|(name, price)| ProductRecord::new(name.as_str(), price.as_str()))
        .collect())
}

/// Removes every tab character from a product name.
pub fn sanitize_name(name: &str) -> String {
    name.replace('\t', "")
}

/// Fetches the category page and scrapes product names and prices from it.
pub async fn extract_listings(
    fetcher: &dyn Fetch,
    category_url: &Url,
    markers: &Markers,
) -> Result<Listings> {
    let body = fetcher.fetch(category_url).await?;
    let listings = scan_listings(&body, markers);
    tracing::info!(
        names = listings.names.len(),
        prices = listings.prices.len(),
        "listings extracted"
    );
    Ok(listings)
}

pub(crate) fn scan_listings(body: &str, markers: &Markers) -> Listings {
    let link_selector = &Selector::parse("a").unwrap();
    let paragraph_selector = &Selector::parse("p").unwrap();
    let document = Html::parse_document(body);

    let names = document
        .select(link_selector)
        .filter(|link| first_class(link) == Some(markers.name_class.as_str()))
        .map(|link| sanitize_name(&link.text().collect::<String>()))
        .collect();

    let prices = document
        .select(paragraph_selector)
        .filter(|p| first_class(p) == Some(markers.price_class.as_str()))
        .map(|p| {
            p.first_child()
                .and_then(|t| t.value().as_text().map(|t| t.to_string()))
                .unwrap_or_else(|| p.text().collect::<String>())
        })
        .collect();

    Listings { names, prices }
}

/// First token of the element's `class` attribute, in source order.
fn first_class<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LISTING: &str = "<html><body>
        <div class=\"card\">
            <a class=\"line-clamp-3 font-bold\" href=\"/p/1\">Phone\tOne</a>
            <p class=\"text-[22px] text-left\">100</p>
        </div>
        <div class=\"card\">
            <a class=\"line-clamp-3\" href=\"/p/2\">Phone Two</a>
            <p class=\"text-[22px]\">200</p>
        </div>
    </body></html>";

    #[test]
    fn scans_names_and_prices_in_document_order() {
        let listings = scan_listings(LISTING, &Markers::default());
        assert_eq!(listings.names, ["PhoneOne", "Phone Two"]);
        assert_eq!(listings.prices, ["100", "200"]);
    }

    #[test]
    fn marker_must_be_first_class_token() {
        let body = r#"
            <a class="font-bold line-clamp-3">Not a product</a>
            <a class="line-clamp-3">Real</a>
            <a>No class</a>
            <p class="mt-2 text-[22px]">1</p>
            <p class="text-[22px]">2</p>
        "#;
        let listings = scan_listings(body, &Markers::default());
        assert_eq!(listings.names, ["Real"]);
        assert_eq!(listings.prices, ["2"]);
    }

    #[test]
    fn price_is_first_text_child_only() {
        let body = r#"<p class="text-[22px]">12,500,000<span>تومان</span></p>"#;
        let listings = scan_listings(body, &Markers::default());
        assert_eq!(listings.prices, ["12,500,000"]);
    }

    #[test]
    fn prices_keep_their_tabs() {
        let body = "<a class=\"line-clamp-3\">A\t</a><p class=\"text-[22px]\">\t9</p>";
        let listings = scan_listings(body, &Markers::default());
        assert_eq!(listings.names, ["A"]);
        assert_eq!(listings.prices, ["\t9"]);
    }

    #[test]
    fn custom_markers_are_honoured() {
        let markers = Markers {
            name_class: "title".into(),
            price_class: "price".into(),
            ..Markers::default()
        };
        let body = r#"<a class="title">X</a><p class="price">1</p><a class="line-clamp-3">Y</a>"#;
        let listings = scan_listings(body, &markers);
        assert_eq!(listings.names, ["X"]);
        assert_eq!(listings.prices, ["1"]);
    }

    #[test]
    fn records_pair_by_position() {
        let listings = Listings {
            names: vec!["A".into(), "B".into(), "C".into()],
            prices: vec!["10".into(), "20".into(), "30".into()],
        };
        assert_eq!(
            listings.records().unwrap(),
            [
                ProductRecord::new("A", "10"),
                ProductRecord::new("B", "20"),
                ProductRecord::new("C", "30"),
            ]
        );
    }

    #[test]
    fn records_reject_length_mismatch() {
        let listings = Listings {
            names: vec!["A".into(), "B".into(), "C".into()],
            prices: vec!["10".into(), "20".into()],
        };
        let err = listings.records().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::LengthMismatch { names: 3, prices: 2 })
        ));
    }

    #[test]
    fn sanitize_strips_all_tabs() {
        assert_eq!(sanitize_name("\tGalaxy\tA54\t"), "GalaxyA54");
        assert_eq!(sanitize_name("iPhone 15"), "iPhone 15");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(name in "[a-zA-Z0-9 \t\u{0600}-\u{06FF}]{0,40}") {
            let once = sanitize_name(&name);
            prop_assert_eq!(sanitize_name(&once), once.clone());
            prop_assert!(!once.contains('\t'));
        }
    }
}
