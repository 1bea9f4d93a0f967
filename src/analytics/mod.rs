//! Analytics module
//!
//! Derives monthly sales statistics from the stored transactions: revenue and
//! sold counts, a price range histogram, a category breakdown and a text search.

mod aggregation;
mod engine;
mod handlers;
mod month;
mod search;

pub use aggregation::{
    CategoryCount, PriceRangeCount, SaleSummary, count_by_category, price_histogram, summarize,
};
pub use engine::{AnalyticsEngine, CombinedReport};
pub use handlers::{
    SearchParams, get_all_transactions, get_categories, get_combined_data, get_price_ranges,
    get_search_results, get_stats,
};
pub use month::{filter_by_month, is_in_month, parse_month};
pub use search::{SearchQuery, search};
