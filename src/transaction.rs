//! The sales transaction record served by the API and consumed by the analytics.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One sales record.
///
/// Every field is optional because the seed data is not validated: a record
/// with a missing price or category is still stored and served, and the
/// analytics decide per field how to treat the gap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The externally assigned ID. Not unique.
    #[serde(default)]
    pub id: Option<i64>,
    /// The product name.
    #[serde(default)]
    pub title: Option<String>,
    /// The sale price, expected to be non-negative.
    #[serde(default)]
    pub price: Option<f64>,
    /// The product description.
    #[serde(default)]
    pub description: Option<String>,
    /// The product category, e.g. "electronics".
    #[serde(default)]
    pub category: Option<String>,
    /// A URL to the product image.
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the product was sold.
    #[serde(default)]
    pub sold: Option<bool>,
    /// When the product was sold. Only the month is used by the analytics.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_of_sale: Option<OffsetDateTime>,
}

impl Transaction {
    /// Create a transaction with the fields the analytics care about.
    ///
    /// The text fields and image are left empty, use struct update syntax to
    /// fill them in.
    #[cfg(test)]
    pub(crate) fn build(price: f64, sold: bool, category: &str, date_of_sale: OffsetDateTime) -> Self {
        Self {
            price: Some(price),
            sold: Some(sold),
            category: Some(category.to_owned()),
            date_of_sale: Some(date_of_sale),
            ..Default::default()
        }
    }
}
