//! The dashboard summary endpoint and the state shared by the view handlers.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use axum_extra::extract::{Query, QueryRejection};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    dashboard::{
        aggregation::{
            CategoryExpense, monthly_net, net_balance, recent_transactions, top_categories,
            total_by_type,
        },
        budget_status::{BudgetStatus, BudgetUsage, budget_usage},
        snapshot::FinanceSnapshot,
    },
    month::{Month, MonthQuery},
    transaction::{Transaction, TransactionType},
};

/// How many of the latest transactions the dashboard shows.
const RECENT_TRANSACTION_COUNT: usize = 3;

/// How many expense categories the dashboard shows.
const TOP_CATEGORY_COUNT: usize = 4;

/// The state needed for the dashboard and chart endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl DashboardState {
    /// Load a [FinanceSnapshot] under one database lock.
    pub(super) fn load_snapshot(&self) -> Result<FinanceSnapshot, Error> {
        let connection = lock_connection(&self.db_connection)?;
        FinanceSnapshot::load(&connection)
    }
}

/// Everything shown on the dashboard for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub month: Month,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_net: f64,
    /// All time income minus all time expenses.
    pub net_balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub recent_transactions: Vec<Transaction>,
    pub top_categories: Vec<CategoryExpense>,
    pub budget_insights: Vec<BudgetUsage>,
    pub over_budget_count: usize,
}

/// Compute the dashboard for `month` from `snapshot`.
pub fn summarize(snapshot: &FinanceSnapshot, month: Month) -> DashboardSummary {
    let transactions = &snapshot.transactions;
    let budget_insights = budget_usage(transactions, &snapshot.budgets, month);
    let over_budget_count = budget_insights
        .iter()
        .filter(|usage| usage.status == BudgetStatus::Over)
        .count();

    DashboardSummary {
        month,
        monthly_income: total_by_type(transactions, TransactionType::Income, Some(month)),
        monthly_expenses: total_by_type(transactions, TransactionType::Expense, Some(month)),
        monthly_net: monthly_net(transactions, month),
        net_balance: net_balance(transactions),
        total_income: total_by_type(transactions, TransactionType::Income, None),
        total_expenses: total_by_type(transactions, TransactionType::Expense, None),
        recent_transactions: recent_transactions(transactions, RECENT_TRANSACTION_COUNT),
        top_categories: top_categories(transactions, Some(month), TOP_CATEGORY_COUNT),
        budget_insights,
        over_budget_count,
    }
}

/// A route handler for the dashboard summary.
///
/// Uses the current month in the local timezone unless `?month=YYYY-MM` is given.
pub async fn get_dashboard(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<DashboardSummary>, Error> {
    let Query(query) = query?;
    let month = query.month_or_current(&state.local_timezone)?;

    let snapshot = state.load_snapshot()?;

    Ok(Json(summarize(&snapshot, month)))
}
