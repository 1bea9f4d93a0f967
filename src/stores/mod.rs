//! Contains the record store trait and its SQLite implementation.

mod transaction;

pub mod sqlite;

pub use transaction::TransactionStore;
