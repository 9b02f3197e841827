//! Fintrack is a personal finance tracker that records income, expenses and
//! savings per user, and reports budget usage against the 50/30/20 rule
//! (needs/wants/savings as fractions of income).
//!
//! This library provides a JSON REST API backed by SQLite. Besides the
//! transaction ledger it manages linked bank accounts and their mock
//! transactions, which can be confirmed into the ledger exactly once.

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

pub mod auth;
mod database_id;
pub mod db;
mod models;
pub mod report;
mod routes;
mod state;
pub mod stores;

pub use database_id::{DatabaseId, UserId};
pub use models::{
    BankAccount, BudgetCategory, Category, CategoryName, ConfirmTransaction, MockTransaction,
    NewBankAccount, NewCategory, NewTransaction, Transaction, TransactionType,
    ValidatedTransaction,
};
pub use routes::build_router;
pub use state::{AppState, SqliteAppState, create_app_state};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
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
    /// A non-income transaction was created without a valid budget category.
    #[error("a budget category (needs, wants or savings) is required")]
    MissingBudgetCategory,

    /// An income transaction was created with a budget category.
    ///
    /// Income is never budgeted against a category, so a caller that sends
    /// one is rejected rather than having their input silently dropped.
    #[error("income transactions cannot have a budget category")]
    InvalidBudgetCategory,

    /// A transaction amount was negative or not a finite number.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A report query asked to group by an unknown dimension.
    #[error("\"{0}\" is not a valid grouping dimension")]
    UnknownDimension(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The mock transaction does not exist, belongs to another user, or was
    /// already confirmed.
    ///
    /// The three cases share one error so that a caller cannot learn whether
    /// another user's record exists, and so that retrying a successful
    /// confirmation fails cleanly instead of duplicating a transaction.
    #[error("mock transaction not found or already confirmed")]
    NotFoundOrAlreadyConfirmed,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed. The only
            // unique column written at request time is the transaction's
            // mock_transaction_id, so a violation means a concurrent confirm
            // won the race.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067
                    && desc.ends_with("transaction.mock_transaction_id") =>
            {
                Error::NotFoundOrAlreadyConfirmed
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::MissingBudgetCategory
            | Error::InvalidBudgetCategory
            | Error::InvalidAmount(_)
            | Error::EmptyCategoryName
            | Error::UnknownDimension(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            Error::NotFound | Error::NotFoundOrAlreadyConfirmed => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            // Store internals are logged where they occur, never sent to the
            // client.
            Error::SqlError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
