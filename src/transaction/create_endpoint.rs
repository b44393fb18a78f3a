//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    app_state::DatabaseState,
    endpoints::{self, format_endpoint},
    transaction::{NewTransaction, TransactionType, create_transaction},
};

/// The JSON body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction, must be positive.
    pub amount: f64,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The category name.
    pub category: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the stored transaction, including its ID and
/// creation time.
pub async fn create_transaction_endpoint(
    State(state): State<DatabaseState>,
    payload: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(form) = payload.inspect_err(|rejection| {
        tracing::warn!("rejected transaction body: {}", rejection.body_text());
    })?;

    let new_transaction = NewTransaction::new(
        form.amount,
        form.date,
        &form.description,
        &form.category,
        form.kind,
    )
    .inspect_err(|error| tracing::warn!("invalid transaction: {error}"))?;

    let connection = state.lock()?;

    let transaction = create_transaction(new_transaction, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    tracing::info!("Created transaction {}", transaction.id);

    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)))
}
