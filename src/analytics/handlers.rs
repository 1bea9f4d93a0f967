//! Analytics HTTP handlers.
//!
//! Each handler reads the month from the request, runs one
//! [AnalyticsEngine] query against the app's store and returns the result as
//! JSON. Invalid months become a 400 response via [Error].

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    analytics::{
        aggregation::{CategoryCount, PriceRangeCount, SaleSummary},
        engine::{AnalyticsEngine, CombinedReport},
    },
    stores::TransactionStore,
    transaction::Transaction,
};

/// The query string for the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// The month number, required.
    pub month: Option<String>,
    /// The text to search for, optional.
    #[serde(rename = "searchText")]
    pub search_text: Option<String>,
}

/// Get every stored transaction.
pub async fn get_all_transactions<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone,
{
    AnalyticsEngine::new(&state.transaction_store)
        .list_all()
        .map(Json)
}

/// Get the revenue and sold counts for a month.
pub async fn get_stats<T>(
    State(state): State<AppState<T>>,
    Path(month): Path<String>,
) -> Result<Json<SaleSummary>, Error>
where
    T: TransactionStore + Clone,
{
    AnalyticsEngine::new(&state.transaction_store)
        .summary(&month)
        .map(Json)
}

/// Get the price range histogram for a month.
pub async fn get_price_ranges<T>(
    State(state): State<AppState<T>>,
    Path(month): Path<String>,
) -> Result<Json<Vec<PriceRangeCount>>, Error>
where
    T: TransactionStore + Clone,
{
    AnalyticsEngine::new(&state.transaction_store)
        .histogram(&month)
        .map(Json)
}

/// Get the number of items per category for a month.
pub async fn get_categories<T>(
    State(state): State<AppState<T>>,
    Path(month): Path<String>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    T: TransactionStore + Clone,
{
    AnalyticsEngine::new(&state.transaction_store)
        .by_category(&month)
        .map(Json)
}

/// Search a month's transactions, falling back to the whole month on no hits.
pub async fn get_search_results<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone,
{
    AnalyticsEngine::new(&state.transaction_store)
        .search(params.month.as_deref(), params.search_text.as_deref())
        .map(Json)
}

/// Get a month's transactions and all of its statistics in one response.
pub async fn get_combined_data<T>(
    State(state): State<AppState<T>>,
    Path(month): Path<String>,
) -> Result<Json<CombinedReport>, Error>
where
    T: TransactionStore + Clone,
{
    AnalyticsEngine::new(&state.transaction_store)
        .combined(&month)
        .map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        AppState, build_router,
        endpoints::{self, format_endpoint},
        stores::{
            TransactionStore,
            sqlite::{SQLiteTransactionStore, create_app_state},
        },
        transaction::Transaction,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = create_app_state(connection).expect("Could not create app state");

        state
            .transaction_store
            .insert_many(&[
                Transaction {
                    id: Some(1),
                    title: Some("Fjallraven Backpack".to_owned()),
                    ..Transaction::build(50.0, true, "A", datetime!(2022-01-10 09:00 UTC))
                },
                Transaction {
                    id: Some(2),
                    title: Some("Rain Jacket".to_owned()),
                    ..Transaction::build(150.0, false, "B", datetime!(2021-01-22 17:30 UTC))
                },
                Transaction {
                    id: Some(3),
                    title: Some("Gold Ring".to_owned()),
                    ..Transaction::build(999.0, true, "C", datetime!(2022-02-02 12:00 UTC))
                },
            ])
            .expect("Could not insert test transactions");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn all_transactions_lists_every_month() {
        let server = get_test_server();

        let response = server.get(endpoints::ALL_TRANSACTIONS).await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Value>>();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0]["title"], "Fjallraven Backpack");
        assert_eq!(transactions[0]["dateOfSale"], "2022-01-10T09:00:00Z");
    }

    #[tokio::test]
    async fn stats_returns_summary() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::STATS, 1)).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "totalSaleAmount": 200.0,
            "totalSoldItems": 1,
            "totalNotSoldItems": 1
        }));
    }

    #[tokio::test]
    async fn price_ranges_returns_ten_buckets() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::PRICE_RANGES, 2)).await;

        response.assert_status_ok();
        let ranges = response.json::<Vec<Value>>();
        assert_eq!(ranges.len(), 10);
        assert_eq!(ranges[0], json!({ "priceRange": "1-100", "numberOfItems": 0 }));
        assert_eq!(
            ranges[9],
            json!({ "priceRange": "901-above", "numberOfItems": 1 })
        );
    }

    #[tokio::test]
    async fn categories_returns_counts() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::CATEGORIES, 1)).await;

        response.assert_status_ok();
        response.assert_json(&json!([
            { "category": "A", "numberOfItems": 1 },
            { "category": "B", "numberOfItems": 1 }
        ]));
    }

    #[tokio::test]
    async fn search_returns_matches() {
        let server = get_test_server();

        let response = server
            .get(endpoints::SEARCH)
            .add_query_param("month", "1")
            .add_query_param("searchText", "jacket")
            .await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Value>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["id"], 2);
    }

    #[tokio::test]
    async fn search_without_hits_returns_the_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::SEARCH)
            .add_query_param("month", "1")
            .add_query_param("searchText", "bicycle")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 2);
    }

    #[tokio::test]
    async fn search_without_month_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::SEARCH)
            .add_query_param("searchText", "jacket")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn combined_data_returns_every_section() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::COMBINED_DATA, 1))
            .await;

        response.assert_status_ok();
        let report = response.json::<Value>();
        assert_eq!(report["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(report["stats"]["totalSaleAmount"], 200.0);
        assert_eq!(report["priceRanges"].as_array().unwrap().len(), 10);
        assert_eq!(report["categories"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalid_months_are_bad_requests() {
        let server = get_test_server();

        for month in ["0", "13", "abc"] {
            for endpoint in [
                endpoints::STATS,
                endpoints::PRICE_RANGES,
                endpoints::CATEGORIES,
                endpoints::COMBINED_DATA,
            ] {
                let response = server.get(&format_endpoint(endpoint, month)).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body = response.json::<Value>();
                assert!(
                    body["error"].as_str().unwrap().contains("1-12"),
                    "unexpected body for {endpoint} with month {month}: {body}"
                );
            }
        }
    }

    #[tokio::test]
    async fn unavailable_store_is_server_error() {
        // No tables, so every read fails.
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(connection))));
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let response = server.get(&format_endpoint(endpoints::STATS, 1)).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Server error" }));
    }
}
