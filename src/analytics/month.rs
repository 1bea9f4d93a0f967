//! Selects transactions by the month-of-year of their sale date.

use time::{Month, UtcOffset};

use crate::{Error, transaction::Transaction};

/// Parse a month number sent by a client.
///
/// Leading and trailing whitespace is ignored. Anything other than an integer
/// from 1 to 12, including a missing value, is rejected.
///
/// # Errors
/// Returns [Error::InvalidMonth] holding the raw input.
pub fn parse_month(raw: Option<&str>) -> Result<Month, Error> {
    let raw = raw.unwrap_or_default();

    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
}

/// Whether `transaction` was sold in `month` of any year.
///
/// The sale date is compared in UTC. A transaction without a sale date is
/// never in any month.
pub fn is_in_month(transaction: &Transaction, month: Month) -> bool {
    transaction
        .date_of_sale
        .is_some_and(|date| date.to_offset(UtcOffset::UTC).month() == month)
}

/// Copy out the transactions sold in `month` of any year, keeping their order.
pub fn filter_by_month(transactions: &[Transaction], month: Month) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| is_in_month(transaction, month))
        .cloned()
        .collect()
}
