//! Implements a struct that holds the state of the REST server.

use crate::stores::TransactionStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore,
{
    /// The store the analytics read [transactions](crate::transaction::Transaction) from.
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore,
{
    /// Create a new [AppState].
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }
}
