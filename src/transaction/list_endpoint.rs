//! Defines the endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    app_state::DatabaseState,
    database_id::TransactionId,
    transaction::{Transaction, get_transaction, list_transactions},
};

/// A route handler that lists all transactions, most recently created first.
pub async fn list_transactions_endpoint(
    State(state): State<DatabaseState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state.lock()?;

    let transactions = list_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    tracing::debug!("Fetched {} transactions", transactions.len());

    Ok(Json(transactions))
}

/// A route handler that fetches a single transaction.
pub async fn get_transaction_endpoint(
    State(state): State<DatabaseState>,
    path: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Transaction>, Error> {
    let Path(transaction_id) = path?;
    let connection = state.lock()?;

    get_transaction(transaction_id, &connection).map(Json)
}
