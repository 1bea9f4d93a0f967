//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The caller supplied a month that is missing, not an integer, or outside
    /// the range 1 to 12.
    ///
    /// Holds the raw text the caller sent so it can be echoed back.
    #[error("a valid month (1-12) is required, got {0:?}")]
    InvalidMonth(String),

    /// The record store could not produce the requested transactions.
    ///
    /// The string should only be logged for debugging on the server.
    /// The client only learns that an internal error occurred.
    #[error("the transaction store is unavailable: {0}")]
    StoreUnavailable(String),

    /// The seed data could not be downloaded or read.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed data was fetched but is not a JSON array of products.
    #[error("seed data is not a valid list of products: {0}")]
    InvalidSeedData(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidMonth(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Server error" })),
                )
                    .into_response()
            }
        }
    }
}
