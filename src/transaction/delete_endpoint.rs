//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    DeleteConfirmation, Error, app_state::DatabaseState, database_id::TransactionId,
    transaction::delete_transaction,
};

/// A route handler for deleting a transaction, responds with a confirmation message.
pub async fn delete_transaction_endpoint(
    State(state): State<DatabaseState>,
    path: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<DeleteConfirmation>, Error> {
    let Path(transaction_id) = path?;
    let connection = state.lock()?;

    delete_transaction(transaction_id, &connection).inspect_err(|error| {
        tracing::error!("Could not delete transaction {transaction_id}: {error}")
    })?;

    tracing::info!("Deleted transaction {transaction_id}");

    Ok(Json(DeleteConfirmation::new("Transaction deleted successfully")))
}
