//! Defines the endpoint for creating a new budget.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    Error,
    app_state::DatabaseState,
    budget::{NewBudget, create_budget},
    endpoints::{self, format_endpoint},
    month::Month,
};

/// The JSON body for creating a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    pub category: String,
    pub amount: f64,
    /// The month in the format "YYYY-MM".
    pub month: Month,
}

/// A route handler for creating a new budget.
///
/// Responds with 400 if a budget for the same category and month already exists.
pub async fn create_budget_endpoint(
    State(state): State<DatabaseState>,
    payload: Result<Json<BudgetForm>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(form) = payload?;

    let new_budget = NewBudget::new(&form.category, form.amount, form.month)
        .inspect_err(|error| tracing::warn!("invalid budget: {error}"))?;

    let connection = state.lock()?;

    let budget = create_budget(new_budget, &connection).inspect_err(|error| match error {
        Error::DuplicateBudget => tracing::warn!(
            "rejected duplicate budget for {} in {}",
            form.category,
            form.month
        ),
        error => tracing::error!("could not create budget: {error}"),
    })?;

    tracing::info!("Created budget {} for {} in {}", budget.id, budget.category, budget.month);

    let location = format_endpoint(endpoints::BUDGET, budget.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(budget)))
}
