//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    analytics::{
        get_all_transactions, get_categories, get_combined_data, get_price_ranges,
        get_search_results, get_stats,
    },
    endpoints,
    stores::TransactionStore,
};

/// Return a router with all the app's routes.
///
/// Any origin may call the API.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + 'static,
{
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ALL_TRANSACTIONS, get(get_all_transactions::<T>))
        .route(endpoints::STATS, get(get_stats::<T>))
        .route(endpoints::PRICE_RANGES, get(get_price_ranges::<T>))
        .route(endpoints::CATEGORIES, get(get_categories::<T>))
        .route(endpoints::SEARCH, get(get_search_results::<T>))
        .route(endpoints::COMBINED_DATA, get(get_combined_data::<T>))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' confirms the server is up.
async fn get_index_page() -> &'static str {
    "Home!"
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
