//! Free text search over one month of transactions.

use crate::transaction::Transaction;

/// What a client searched for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    /// The lowercased search text, `None` when the client did not search.
    text: Option<String>,
    /// The search text read as a price, if it is a number.
    price: Option<f64>,
}

impl SearchQuery {
    /// Create a query from the raw search text.
    ///
    /// Missing and empty text mean "no search". Any other text, including
    /// whitespace, is matched as is. Surrounding whitespace is only ignored
    /// when reading the text as a price.
    pub fn new(raw: Option<&str>) -> Self {
        let Some(text) = raw.filter(|text| !text.is_empty()) else {
            return Self::default();
        };

        let price = text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Self {
            text: Some(text.to_lowercase()),
            price,
        }
    }

    /// Whether `transaction` matches this query.
    ///
    /// The title, description and category are searched for the text ignoring
    /// case. If the text is a number, a transaction with exactly that price
    /// also matches. Every transaction matches an empty query.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let Some(text) = &self.text else {
            return true;
        };

        let contains_text = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(text.as_str()))
        };

        contains_text(&transaction.title)
            || contains_text(&transaction.description)
            || contains_text(&transaction.category)
            || self
                .price
                .is_some_and(|price| transaction.price == Some(price))
    }
}

/// Search `transactions`, which should already be narrowed to one month.
///
/// When nothing matches, all of `transactions` is returned instead of an empty
/// list, so a client can never tell a search with no hits from no search.
pub fn search(transactions: &[Transaction], query: &SearchQuery) -> Vec<Transaction> {
    let matches: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| query.matches(transaction))
        .cloned()
        .collect();

    if matches.is_empty() {
        return transactions.to_vec();
    }

    matches
}
