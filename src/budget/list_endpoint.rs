//! Defines the endpoints for reading budgets.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use axum_extra::extract::{Query, QueryRejection};

use crate::{
    Error,
    app_state::DatabaseState,
    budget::{Budget, get_budget, list_budgets},
    database_id::BudgetId,
    month::MonthQuery,
};

/// A route handler that lists budgets, optionally only those for one month.
pub async fn list_budgets_endpoint(
    State(state): State<DatabaseState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<Budget>>, Error> {
    let Query(query) = query?;
    let connection = state.lock()?;

    let budgets = list_budgets(query.month, &connection)
        .inspect_err(|error| tracing::error!("could not list budgets: {error}"))?;

    Ok(Json(budgets))
}

/// A route handler that fetches a single budget.
pub async fn get_budget_endpoint(
    State(state): State<DatabaseState>,
    path: Result<Path<BudgetId>, PathRejection>,
) -> Result<Json<Budget>, Error> {
    let Path(budget_id) = path?;
    let connection = state.lock()?;

    get_budget(budget_id, &connection).map(Json)
}
