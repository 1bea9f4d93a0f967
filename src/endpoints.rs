//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/stats/{month}', use [format_endpoint].

use std::fmt::Display;

/// The root route, a plain text liveness check.
pub const ROOT: &str = "/";
/// The route to list every transaction.
pub const ALL_TRANSACTIONS: &str = "/api/fetchAllProducts";
/// The route for a month's revenue and sold counts.
pub const STATS: &str = "/api/stats/{month}";
/// The route for a month's price range histogram.
pub const PRICE_RANGES: &str = "/api/price-range/{month}";
/// The route for a month's item count per category.
pub const CATEGORIES: &str = "/api/categories/{month}";
/// The route for searching a month's transactions.
///
/// Takes the query parameters `month` and `searchText`.
pub const SEARCH: &str = "/api/search";
/// The route for a month's transactions and all of its statistics.
pub const COMBINED_DATA: &str = "/api/combined-data/{month}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/stats/{month}', '{month}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::ALL_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATS);
        assert_endpoint_is_valid_uri(endpoints::PRICE_RANGES);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::SEARCH);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_DATA);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/api/stats/{month}", 3);

        assert_eq!(formatted_path, "/api/stats/3");
        assert!(formatted_path.parse::<Uri>().is_ok());

        let formatted_path = format_endpoint("/api/stats/{month}", "abc");

        assert_eq!(formatted_path, "/api/stats/abc");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/api/search", 1);

        assert_eq!(formatted_path, "/api/search");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
