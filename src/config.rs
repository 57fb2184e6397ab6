use std::path::PathBuf;

const ROOT_URL: &str = "http://technolife.ir";
const DATABASE_PATH: &str = "Database/Phone_prices.db";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/118.0";

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
/// Markup markers the scraper relies on.
///
/// These strings are the whole contract with the site's markup. When the
/// site changes its layout, this is the only place that should change.
pub struct Markers {
    /// Exact text of the anchor pointing to the mobile phones category.
    pub category_label: String,
    /// First class token of anchors holding a product name.
    pub name_class: String,
    /// First class token of paragraphs holding a product price.
    pub price_class: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            category_label: "قیمت گوشی".into(),
            name_class: "line-clamp-3".into(),
            price_class: "text-[22px]".into(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
/// Settings for a scraping run, fixed at build time.
///
/// Use `Config::default()` for the production values.
pub struct Config {
    /// Site root the category link is discovered from.
    pub root_url: String,
    /// SQLite file the records are written to.
    pub database_path: PathBuf,
    /// User agent sent with every request. Must not be empty.
    pub user_agent: String,
    pub markers: Markers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_url: ROOT_URL.into(),
            database_path: DATABASE_PATH.into(),
            user_agent: USER_AGENT.into(),
            markers: Markers::default(),
        }
    }
}
