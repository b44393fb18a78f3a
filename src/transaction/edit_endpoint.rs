//! Defines the endpoint for updating a transaction.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    app_state::DatabaseState,
    database_id::TransactionId,
    transaction::{Transaction, TransactionUpdate, update_transaction},
};

/// A route handler that merges the fields in the request body into a transaction.
///
/// Fields that are missing from the body keep their stored values. Responds
/// with the updated transaction, or 404 if there is no such transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<DatabaseState>,
    path: Result<Path<TransactionId>, PathRejection>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Path(transaction_id) = path?;
    let Json(update) = payload?;
    let update = update.validate().inspect_err(|error| {
        tracing::warn!("invalid update for transaction {transaction_id}: {error}")
    })?;

    let connection = state.lock()?;

    let transaction =
        update_transaction(transaction_id, update, &connection).inspect_err(|error| {
            tracing::error!("Could not update transaction {transaction_id}: {error}")
        })?;

    tracing::info!("Updated transaction {transaction_id}");

    Ok(Json(transaction))
}
