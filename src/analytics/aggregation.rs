//! Sales statistics over a set of transactions.
//!
//! Every function here works on a slice that the caller has already narrowed
//! to one month, so that several statistics computed from the same slice agree
//! with each other.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::Transaction;

/// The lower bound of each price range, in order. The last range is open ended.
const PRICE_RANGE_LOWER_BOUNDS: [f64; 10] = [
    1.0, 101.0, 201.0, 301.0, 401.0, 501.0, 601.0, 701.0, 801.0, 901.0,
];

/// The label of each price range, matching [PRICE_RANGE_LOWER_BOUNDS].
const PRICE_RANGE_LABELS: [&str; 10] = [
    "1-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

/// Revenue and sold counts for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    /// The sum of all known prices, rounded to two decimal places.
    pub total_sale_amount: f64,
    /// The number of transactions marked as sold.
    pub total_sold_items: usize,
    /// The number of transactions marked as not sold.
    pub total_not_sold_items: usize,
}

/// The number of transactions whose price falls in one range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeCount {
    /// The range label, e.g. "101-200".
    pub price_range: &'static str,
    /// The number of transactions in the range.
    pub number_of_items: usize,
}

/// The number of transactions in one category.
///
/// `category` is `None` for the group of transactions without a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// The category shared by the group.
    pub category: Option<String>,
    /// The number of transactions in the group.
    pub number_of_items: usize,
}

/// Calculates the revenue and the number of sold and unsold items.
///
/// Transactions without a price add nothing to the revenue, and transactions
/// without a sold flag are counted as neither sold nor unsold.
pub fn summarize(transactions: &[Transaction]) -> SaleSummary {
    let total: f64 = transactions.iter().filter_map(|t| t.price).sum();

    let total_sold_items = transactions
        .iter()
        .filter(|t| t.sold == Some(true))
        .count();
    let total_not_sold_items = transactions
        .iter()
        .filter(|t| t.sold == Some(false))
        .count();

    SaleSummary {
        total_sale_amount: round_to_cents(total),
        total_sold_items,
        total_not_sold_items,
    }
}

/// Counts transactions into the ten fixed price ranges.
///
/// All ten ranges are always returned in ascending order, with a count of zero
/// for empty ranges. Prices below 1 and missing prices are not counted.
pub fn price_histogram(transactions: &[Transaction]) -> Vec<PriceRangeCount> {
    let mut counts = [0usize; PRICE_RANGE_LOWER_BOUNDS.len()];

    for price in transactions.iter().filter_map(|t| t.price) {
        if let Some(index) = price_range_index(price) {
            counts[index] += 1;
        }
    }

    PRICE_RANGE_LABELS
        .iter()
        .zip(counts)
        .map(|(&price_range, number_of_items)| PriceRangeCount {
            price_range,
            number_of_items,
        })
        .collect()
}

/// Counts transactions per category, largest group first.
///
/// Groups with the same count keep the order in which their category first
/// appears in `transactions`.
pub fn count_by_category(transactions: &[Transaction]) -> Vec<CategoryCount> {
    let mut index_by_category: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<CategoryCount> = Vec::new();

    for transaction in transactions {
        let key = transaction.category.as_deref();

        let index = *index_by_category.entry(key).or_insert_with(|| {
            groups.push(CategoryCount {
                category: key.map(str::to_owned),
                number_of_items: 0,
            });
            groups.len() - 1
        });

        groups[index].number_of_items += 1;
    }

    // `sort_by` is stable, which gives the first-seen tie break.
    groups.sort_by(|a, b| b.number_of_items.cmp(&a.number_of_items));
    groups
}

/// The index of the price range containing `price`, if any.
fn price_range_index(price: f64) -> Option<usize> {
    PRICE_RANGE_LOWER_BOUNDS
        .iter()
        .rposition(|&lower_bound| price >= lower_bound)
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
