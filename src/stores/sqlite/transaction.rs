//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, types::Type};
use time::{Month, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{Error, db::CreateTable, stores::TransactionStore, transaction::Transaction};

const SELECT_COLUMNS: &str =
    "SELECT id, title, price, description, category, image, sold, date_of_sale
     FROM product_transaction";

/// Stores transactions in a SQLite database.
///
/// Sale dates are stored as RFC 3339 text in UTC so that SQLite's date
/// functions see the same month as [crate::analytics::is_in_month].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::StoreUnavailable("could not acquire the database lock".to_owned())
        })
    }

    fn query(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(sql)
            .and_then(|mut statement| {
                let transactions = statement
                    .query_map(params, map_row)?
                    .collect::<Result<Vec<_>, _>>();
                transactions
            })
            .map_err(|error| {
                tracing::error!("could not read transactions: {error}");
                Error::StoreUnavailable(error.to_string())
            })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY row_id"), [])
    }

    /// Filters by month in SQL instead of in memory.
    fn list_by_month(&self, month: Month) -> Result<Vec<Transaction>, Error> {
        self.query(
            &format!(
                "{SELECT_COLUMNS}
                 WHERE CAST(strftime('%m', date_of_sale) AS INTEGER) = ?1
                 ORDER BY row_id"
            ),
            [month as u8],
        )
    }

    /// Insert all of `transactions` in one SQL transaction.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if any insert fails, in which case nothing is
    /// inserted.
    fn insert_many(&self, transactions: &[Transaction]) -> Result<usize, Error> {
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction()?;

        // Prepare the insert statement once for reuse
        let mut stmt = tx.prepare(
            "INSERT INTO product_transaction
                (id, title, price, description, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        for transaction in transactions {
            stmt.execute((
                transaction.id,
                &transaction.title,
                transaction.price,
                &transaction.description,
                &transaction.category,
                &transaction.image,
                transaction.sold,
                format_date(transaction.date_of_sale)?,
            ))?;
        }

        drop(stmt);

        tx.commit()?;
        Ok(transactions.len())
    }

    fn count(&self) -> Result<usize, Error> {
        self.lock()?
            .query_row("SELECT COUNT(*) FROM product_transaction;", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // `row_id` keeps the seed order, `id` comes from the seed data and may repeat.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS product_transaction (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER,
                title TEXT,
                price REAL,
                description TEXT,
                category TEXT,
                image TEXT,
                sold INTEGER,
                date_of_sale TEXT
            )",
            (),
        )?;

        Ok(())
    }
}

fn format_date(date: Option<OffsetDateTime>) -> Result<Option<String>, Error> {
    date.map(|date| {
        date.to_offset(UtcOffset::UTC)
            .format(&Rfc3339)
            .map_err(|error| Error::InvalidSeedData(format!("could not format {date}: {error}")))
    })
    .transpose()
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_date: Option<String> = row.get(7)?;
    let date_of_sale = raw_date
        .map(|raw_date| OffsetDateTime::parse(&raw_date, &Rfc3339))
        .transpose()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(error)))?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        Error, analytics::filter_by_month, db::initialize, stores::TransactionStore,
        transaction::Transaction,
    };

    use super::SQLiteTransactionStore;

    fn get_test_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    fn get_test_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: Some(1),
                title: Some("Fjallraven Backpack".to_owned()),
                description: Some("Your perfect pack for everyday use".to_owned()),
                image: Some("https://example.com/1.jpg".to_owned()),
                ..Transaction::build(109.95, false, "men's clothing", datetime!(2021-11-27 14:59:54 UTC))
            },
            Transaction::build(22.3, true, "men's clothing", datetime!(2021-10-27 14:59:54 UTC)),
            Transaction::build(55.99, true, "electronics", datetime!(2022-11-03 00:00 UTC)),
            // Still October in UTC.
            Transaction::build(7.95, false, "jewelery", datetime!(2021-11-01 02:00 +03:00)),
            Transaction {
                id: Some(1),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn insert_then_list_all_preserves_order_and_fields() {
        let store = get_test_store();
        let transactions = get_test_transactions();

        let inserted = store.insert_many(&transactions).unwrap();
        let got = store.list_all().unwrap();

        assert_eq!(inserted, transactions.len());
        assert_eq!(got, transactions);
    }

    #[test]
    fn list_by_month_equals_filtered_list_all() {
        let store = get_test_store();
        store.insert_many(&get_test_transactions()).unwrap();
        let all = store.list_all().unwrap();

        for month in [Month::January, Month::October, Month::November] {
            let got = store.list_by_month(month).unwrap();

            assert_eq!(got, filter_by_month(&all, month), "month {month}");
        }
    }

    #[test]
    fn list_by_month_ignores_year() {
        let store = get_test_store();
        store.insert_many(&get_test_transactions()).unwrap();

        let got = store.list_by_month(Month::November).unwrap();

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn count_returns_number_of_rows() {
        let store = get_test_store();
        assert_eq!(store.count().unwrap(), 0);

        store.insert_many(&get_test_transactions()).unwrap();

        assert_eq!(store.count().unwrap(), 5);
    }

    #[test]
    fn list_all_without_table_is_store_unavailable() {
        let connection = Connection::open_in_memory().unwrap();
        let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)));

        let result = store.list_all();

        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
    }
}
