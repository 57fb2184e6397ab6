use thiserror::Error;

/// Conditions a caller may want to tell apart from plain transport or
/// I/O failures. They travel inside `eyre::Report`; recover them with
/// `report.downcast_ref::<ScrapeError>()`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No anchor on the root page carried the category label.
    #[error("no link labelled {label:?} found on {url}")]
    CategoryNotFound { url: String, label: String },

    /// The listing scans produced a different number of names and prices,
    /// so positional pairing would misalign records.
    #[error("found {names} product names but {prices} prices")]
    LengthMismatch { names: usize, prices: usize },

    /// A row with this name already exists.
    #[error("product {0:?} is already stored")]
    DuplicateName(String),

    #[error("user agent must not be empty")]
    EmptyUserAgent,

    /// Any other storage failure for a single write.
    #[error("failed to store {name:?}: {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: sqlx::Error,
    },
}
