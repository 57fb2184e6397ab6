use std::fmt;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::FromRow)]
/// A phone listed on the category page.
pub struct ProductRecord {
    /// Display name, tabs removed. Unique within the table.
    pub name: String,
    /// Price as shown on the page, kept as text.
    pub price: String,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.name, self.price)
    }
}
