mod extractor;
mod record;

pub(crate) use extractor::pair;
pub use extractor::{extract_listings, sanitize_name, Listings};
pub use record::ProductRecord;
