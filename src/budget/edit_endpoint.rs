//! Defines the endpoint for updating a budget.

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
    budget::{Budget, BudgetUpdate, update_budget},
    database_id::BudgetId,
};

/// A route handler that merges the fields in the request body into a budget.
pub async fn edit_budget_endpoint(
    State(state): State<DatabaseState>,
    path: Result<Path<BudgetId>, PathRejection>,
    payload: Result<Json<BudgetUpdate>, JsonRejection>,
) -> Result<Json<Budget>, Error> {
    let Path(budget_id) = path?;
    let Json(update) = payload?;
    let update = update.validate()?;

    let connection = state.lock()?;

    let budget = update_budget(budget_id, update, &connection)
        .inspect_err(|error| tracing::warn!("Could not update budget {budget_id}: {error}"))?;

    tracing::info!("Updated budget {budget_id}");

    Ok(Json(budget))
}
