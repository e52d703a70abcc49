//! Salesboard is a small data dashboard over a collection of sale transactions.
//!
//! This library provides a JSON API for listing, searching and paginating the
//! transactions, and for the aggregate views used by the dashboard charts:
//! monthly statistics, a price-range histogram and a category breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod not_found;
mod pagination;
mod query_runner;
mod routing;
pub mod stores;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::{AppState, SQLAppState, create_app_state};
pub use dashboard::{
    CategoryCount, CombinedData, PRICE_BOUNDARIES, PriceBucket, Statistics,
    get_category_distribution, get_combined, get_price_buckets, get_statistics,
};
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use query_runner::{DEFAULT_QUERY_TIMEOUT, run_query};
pub use routing::build_router;
pub use transaction::{
    Predicate, SearchTerm, Transaction, TransactionBuilder, build_filter, count_transactions,
    create_transaction, import_transactions, list_transactions, parse_month,
};

use crate::not_found::get_404_not_found_response;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month query parameter was not an integer between 1 and 12.
    #[error("invalid month \"{0}\", expected a number from 1 to 12")]
    InvalidMonth(String),

    /// The page query parameter was not an integer.
    #[error("invalid page \"{0}\", expected a whole number")]
    InvalidPage(String),

    /// The page size query parameter was not a positive integer.
    #[error("invalid page size \"{0}\", expected a whole number greater than zero")]
    InvalidPageSize(String),

    /// A transaction was created with an empty title.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// A transaction was created with a price below zero.
    #[error("{0} is a negative price, which is not allowed")]
    NegativePrice(f64),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A store query did not finish within the configured time limit.
    #[error("the query did not finish within {0:?}")]
    QueryTimeout(Duration),

    /// The task running a store query panicked or was cancelled.
    #[error("the query task failed: {0}")]
    QueryTaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPage(_) | Error::InvalidPageSize(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::QueryTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidMonth(_) | Error::InvalidPage(_) | Error::InvalidPageSize(_) => {
                let status = self.status_code();
                (status, Json(json!({ "error": self.to_string() }))).into_response()
            }
            Error::QueryTimeout(_) => {
                tracing::error!("{self}");
                let status = self.status_code();
                (
                    status,
                    Json(json!({ "error": "The query took too long, try again later." })),
                )
                    .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    error.status_code(),
                    Json(json!({
                        "error": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use std::time::Duration;

    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn validation_errors_are_bad_requests() {
        for error in [
            Error::InvalidMonth("13".to_owned()),
            Error::InvalidPage("abc".to_owned()),
            Error::InvalidPageSize("0".to_owned()),
        ] {
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn timeout_is_gateway_timeout() {
        let response = Error::QueryTimeout(Duration::from_millis(10)).into_response();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
