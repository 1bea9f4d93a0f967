//! The queries the API exposes, composed from the month filter, the
//! aggregations and the search.

use serde::Serialize;
use time::Month;

use crate::{
    Error,
    analytics::{
        aggregation::{
            CategoryCount, PriceRangeCount, SaleSummary, count_by_category, price_histogram,
            summarize,
        },
        month::parse_month,
        search::{SearchQuery, search},
    },
    stores::TransactionStore,
    transaction::Transaction,
};

/// Every statistic for one month, computed from a single read of the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// The month's transactions in store order.
    pub transactions: Vec<Transaction>,
    /// See [AnalyticsEngine::summary].
    pub stats: SaleSummary,
    /// See [AnalyticsEngine::histogram].
    pub price_ranges: Vec<PriceRangeCount>,
    /// See [AnalyticsEngine::by_category].
    pub categories: Vec<CategoryCount>,
}

/// Answers analytics queries against a [TransactionStore].
///
/// Each query validates the month before reading the store and reads it
/// exactly once. Queries never write, so any number of engines may share a
/// store.
pub struct AnalyticsEngine<'a, T: TransactionStore + ?Sized> {
    store: &'a T,
}

impl<'a, T: TransactionStore + ?Sized> AnalyticsEngine<'a, T> {
    /// Create an engine that reads from `store`.
    pub fn new(store: &'a T) -> Self {
        Self { store }
    }

    /// Every transaction in the store, regardless of month.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the store cannot be read.
    pub fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        self.store.list_all()
    }

    /// The revenue and the sold and unsold counts for `month`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is not 1 to 12, or
    /// [Error::StoreUnavailable] if the store cannot be read.
    pub fn summary(&self, month: &str) -> Result<SaleSummary, Error> {
        let transactions = self.month_snapshot(Some(month))?;

        Ok(summarize(&transactions))
    }

    /// The number of transactions in each of the ten price ranges for `month`.
    ///
    /// # Errors
    /// See [AnalyticsEngine::summary].
    pub fn histogram(&self, month: &str) -> Result<Vec<PriceRangeCount>, Error> {
        let transactions = self.month_snapshot(Some(month))?;

        Ok(price_histogram(&transactions))
    }

    /// The number of transactions per category for `month`, largest first.
    ///
    /// # Errors
    /// See [AnalyticsEngine::summary].
    pub fn by_category(&self, month: &str) -> Result<Vec<CategoryCount>, Error> {
        let transactions = self.month_snapshot(Some(month))?;

        Ok(count_by_category(&transactions))
    }

    /// The transactions for `month` that match `text`.
    ///
    /// Falls back to every transaction for the month when `text` is missing or
    /// matches nothing. A missing `month` is an error, not an empty result.
    ///
    /// # Errors
    /// See [AnalyticsEngine::summary].
    pub fn search(
        &self,
        month: Option<&str>,
        text: Option<&str>,
    ) -> Result<Vec<Transaction>, Error> {
        let query = SearchQuery::new(text);
        let transactions = self.month_snapshot(month)?;

        Ok(search(&transactions, &query))
    }

    /// The month's transactions together with every statistic computed over them.
    ///
    /// # Errors
    /// See [AnalyticsEngine::summary].
    pub fn combined(&self, month: &str) -> Result<CombinedReport, Error> {
        let transactions = self.month_snapshot(Some(month))?;

        Ok(CombinedReport {
            stats: summarize(&transactions),
            price_ranges: price_histogram(&transactions),
            categories: count_by_category(&transactions),
            transactions,
        })
    }

    /// Validate `month` and then read its transactions from the store.
    fn month_snapshot(&self, month: Option<&str>) -> Result<Vec<Transaction>, Error> {
        let month: Month = parse_month(month)?;

        self.store.list_by_month(month)
    }
}
