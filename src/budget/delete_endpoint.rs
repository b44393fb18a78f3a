//! Defines the endpoint for deleting a budget.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    DeleteConfirmation, Error, app_state::DatabaseState, budget::delete_budget,
    database_id::BudgetId,
};

/// A route handler for deleting a budget, responds with a confirmation message.
pub async fn delete_budget_endpoint(
    State(state): State<DatabaseState>,
    path: Result<Path<BudgetId>, PathRejection>,
) -> Result<Json<DeleteConfirmation>, Error> {
    let Path(budget_id) = path?;
    let connection = state.lock()?;

    delete_budget(budget_id, &connection)
        .inspect_err(|error| tracing::warn!("Could not delete budget {budget_id}: {error}"))?;

    tracing::info!("Deleted budget {budget_id}");

    Ok(Json(DeleteConfirmation::new("Budget deleted")))
}
