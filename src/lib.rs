//! Pocketledger is a web service for tracking personal income, expenses and
//! monthly category budgets.
//!
//! This library provides a JSON REST API over two collections, transactions
//! and budgets, plus read-only views (dashboard summary, chart series and
//! budget-vs-actual comparisons) that are recomputed from the stored records
//! on every request.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
mod budget;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod month;
mod not_found;
mod routing;
mod timezone;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget::{Budget, NewBudget, create_budget};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::Month;
pub use routing::build_router;
pub use transaction::{NewTransaction, Transaction, TransactionType, create_transaction};

/// How long in-flight requests are given to finish once a shutdown signal arrives.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Wait for either ctrl+c or the terminate signal, whichever comes first,
/// then tell the server behind `handle` to shut down gracefully.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let signal_name = shutdown_signal().await;
    tracing::info!("Received {signal_name}, shutting down.");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate signal",
    }
}

/// The errors that may occur in the application.
///
/// Each variant belongs to one of three families which decide the HTTP
/// status code: validation errors (400), missing records (404) and store
/// failures (500).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount was zero, negative or not a finite number.
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    /// A transaction description was empty or only whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// A category name was empty or only whitespace.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A month string was not of the form `YYYY-MM`.
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// The JSON request body was missing, malformed, or had fields of the
    /// wrong type.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The query string could not be parsed.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// A path segment, such as a record ID, could not be parsed.
    #[error("invalid path parameter: {0}")]
    InvalidPathParameter(String),

    /// A budget for the same category and month already exists.
    ///
    /// At most one budget may exist per category and month so that budget
    /// usage is never ambiguous.
    #[error("a budget for this category and month already exists")]
    DuplicateBudget,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("transaction not found")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("transaction not found")]
    DeleteMissingTransaction,

    /// Tried to update a budget that does not exist
    #[error("budget not found")]
    UpdateMissingBudget,

    /// Tried to delete a budget that does not exist
    #[error("budget not found")]
    DeleteMissingBudget,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The configured timezone is not a valid, canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl Error {
    /// The HTTP status code used when this error is sent to a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidAmount(_)
            | Error::EmptyDescription
            | Error::EmptyCategory
            | Error::InvalidMonth(_)
            | Error::InvalidRequestBody(_)
            | Error::InvalidQuery(_)
            | Error::InvalidPathParameter(_)
            | Error::DuplicateBudget => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction
            | Error::UpdateMissingBudget
            | Error::DeleteMissingBudget => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezone(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && desc.contains("budget.category") =>
            {
                Error::DuplicateBudget
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPathParameter(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.to_string())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// The JSON body sent to clients after a record has been deleted.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Store details are for the server logs only.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(Error::InvalidAmount(0.0).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::EmptyCategory.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::DuplicateBudget.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::InvalidPathParameter("abc".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_records_are_not_found() {
        assert_eq!(
            Error::UpdateMissingTransaction.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(Error::DeleteMissingBudget.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(Error::from(rusqlite::Error::QueryReturnedNoRows), Error::NotFound);
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(!message.contains("SQL"), "got {message}");
    }
}
