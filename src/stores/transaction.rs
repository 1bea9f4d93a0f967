//! Defines the transaction store trait.

use time::Month;

use crate::{Error, analytics::filter_by_month, transaction::Transaction};

/// Holds the sales transactions the analytics are computed from.
///
/// Transactions are written once by the seeder and only read afterwards, so
/// implementations may be shared between concurrent requests.
pub trait TransactionStore: Send + Sync {
    /// Retrieve every transaction in insertion order.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the transactions cannot be read.
    fn list_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions sold in `month` of any year, in insertion order.
    ///
    /// The result must equal [TransactionStore::list_all] narrowed with
    /// [filter_by_month]. Implementers may override this to filter at the source.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the transactions cannot be read.
    fn list_by_month(&self, month: Month) -> Result<Vec<Transaction>, Error> {
        Ok(filter_by_month(&self.list_all()?, month))
    }

    /// Add `transactions` to the store as a single unit, returning how many were added.
    fn insert_many(&self, transactions: &[Transaction]) -> Result<usize, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;
}
