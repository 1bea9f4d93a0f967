//! Populates an empty store with the product transaction dataset.
//!
//! Seeding happens once, before the server starts answering requests. After
//! that the transactions are never written again.

use std::{fmt::Display, path::PathBuf};

use serde::Deserialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, stores::TransactionStore, transaction::Transaction};

/// Where the product dataset is published.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Where to read seed data from.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    /// Download the JSON over HTTP(S).
    Url(String),
    /// Read the JSON from a local file.
    File(PathBuf),
}

impl SeedSource {
    /// Treat `source` as a URL if it has an HTTP(S) scheme, otherwise as a file path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_owned())
        } else {
            Self::File(PathBuf::from(source))
        }
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::Url(DEFAULT_SEED_URL.to_owned())
    }
}

impl Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSource::Url(url) => write!(f, "{url}"),
            SeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One product as it appears in the seed data.
///
/// The sale date is kept as text so that a bad date drops just the date
/// instead of the whole dataset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedProduct {
    id: Option<i64>,
    title: Option<String>,
    price: Option<f64>,
    description: Option<String>,
    category: Option<String>,
    image: Option<String>,
    sold: Option<bool>,
    date_of_sale: Option<String>,
}

impl From<SeedProduct> for Transaction {
    fn from(product: SeedProduct) -> Self {
        let date_of_sale = product.date_of_sale.and_then(|raw_date| {
            OffsetDateTime::parse(&raw_date, &Rfc3339)
                .inspect_err(|error| {
                    tracing::warn!(
                        "ignoring invalid sale date {raw_date:?} for product {:?}: {error}",
                        product.id
                    )
                })
                .ok()
        });

        Transaction {
            id: product.id,
            title: product.title,
            price: product.price,
            description: product.description,
            category: product.category,
            image: product.image,
            sold: product.sold,
            date_of_sale,
        }
    }
}

/// Parse the seed data, a JSON array of products.
///
/// # Errors
/// Returns [Error::InvalidSeedData] if `json` is not an array of product objects.
pub fn parse_seed_data(json: &str) -> Result<Vec<Transaction>, Error> {
    let products: Vec<SeedProduct> =
        serde_json::from_str(json).map_err(|error| Error::InvalidSeedData(error.to_string()))?;

    Ok(products.into_iter().map(Transaction::from).collect())
}

/// Download or read the seed data and parse it.
///
/// # Errors
/// Returns [Error::SeedFetch] if the data cannot be fetched, or
/// [Error::InvalidSeedData] if it cannot be parsed.
pub async fn fetch_seed_data(source: &SeedSource) -> Result<Vec<Transaction>, Error> {
    let json = match source {
        SeedSource::Url(url) => fetch_url(url).await?,
        SeedSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|error| Error::SeedFetch(format!("{}: {error}", path.display())))?,
    };

    parse_seed_data(&json)
}

async fn fetch_url(url: &str) -> Result<String, Error> {
    let response = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::SeedFetch(error.to_string()))?;

    response
        .text()
        .await
        .map_err(|error| Error::SeedFetch(error.to_string()))
}

/// Fill `store` from `source` unless it already holds transactions.
///
/// Returns the number of transactions inserted, zero if the store was
/// already seeded. Either every transaction is inserted or none are.
///
/// # Errors
/// Returns an error if the store cannot be read or written, or if the seed
/// data cannot be fetched or parsed.
pub async fn seed_if_empty<T>(store: &T, source: &SeedSource) -> Result<usize, Error>
where
    T: TransactionStore + ?Sized,
{
    let existing = store.count()?;
    if existing > 0 {
        tracing::info!("Store already holds {existing} transactions, skipping seeding.");
        return Ok(0);
    }

    tracing::info!("Fetching seed data from {source}");
    let transactions = fetch_seed_data(source).await?;

    let inserted = store.insert_many(&transactions)?;
    tracing::info!("Inserted {inserted} transactions.");

    Ok(inserted)
}
