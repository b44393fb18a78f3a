//! Chart-ready series for the dashboard.
//!
//! This module packages aggregates for three charts:
//! - **Category chart**: the largest expense categories and their share of spending
//! - **Monthly chart**: total expenses for each of the latest months
//! - **Budget chart**: each budget's limit next to what was actually spent
//!
//! The client draws the charts. Everything here is plain JSON.

use axum::{Json, extract::State};
use axum_extra::extract::{Query, QueryRejection};
use serde::Serialize;

use crate::{
    Error,
    dashboard::{
        aggregation::{CategoryExpense, MonthlyExpense, monthly_expense_trend, top_categories},
        budget_status::{
            BudgetStatus, BudgetUsage, budget_usage, display_percentage, percentage_used,
        },
        handlers::DashboardState,
        snapshot::FinanceSnapshot,
    },
    database_id::BudgetId,
    month::{Month, MonthQuery},
};

/// How many categories the category chart shows.
const CATEGORY_CHART_SIZE: usize = 8;

/// How many months the monthly chart covers.
const MONTHLY_CHART_WINDOW: usize = 6;

// ============================================================================
// CATEGORY CHART
// ============================================================================

/// One slice of the category chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    pub count: usize,
    pub color: &'static str,
    /// The slice's share of the chart total, from 0 to 100.
    pub percentage: f64,
}

/// The largest expense categories for a month, or for all time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    /// `None` when the chart covers all time.
    pub month: Option<Month>,
    /// The sum of the slices shown.
    pub total: f64,
    pub slices: Vec<CategorySlice>,
}

/// Builds the category chart from the top expense categories.
///
/// # Arguments
/// * `snapshot` - The transactions to chart
/// * `month` - Restrict the chart to one month, or `None` for all time
pub fn category_chart(snapshot: &FinanceSnapshot, month: Option<Month>) -> CategoryChart {
    let top = top_categories(&snapshot.transactions, month, CATEGORY_CHART_SIZE);
    let total = top.iter().fold(0.0, |total, entry| total + entry.amount);

    let slices = top
        .into_iter()
        .map(
            |CategoryExpense {
                 category,
                 amount,
                 count,
                 color,
             }| CategorySlice {
                percentage: if total > 0.0 { amount * 100.0 / total } else { 0.0 },
                category,
                amount,
                count,
                color,
            },
        )
        .collect();

    CategoryChart {
        month,
        total,
        slices,
    }
}

/// A route handler for the category chart.
///
/// Covers all time unless `?month=YYYY-MM` is given.
pub async fn get_category_chart(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CategoryChart>, Error> {
    let Query(query) = query?;
    let snapshot = state.load_snapshot()?;

    Ok(Json(category_chart(&snapshot, query.month)))
}

// ============================================================================
// MONTHLY CHART
// ============================================================================

/// Total expenses for the latest months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyChart {
    /// Chronological, only months that have expenses.
    pub months: Vec<MonthlyExpense>,
    pub total: f64,
    /// The average of the months shown, zero if there are none.
    pub average: f64,
}

/// Builds the monthly expense chart.
pub fn monthly_chart(snapshot: &FinanceSnapshot) -> MonthlyChart {
    let months = monthly_expense_trend(&snapshot.transactions, MONTHLY_CHART_WINDOW);
    let total = months.iter().fold(0.0, |total, point| total + point.total);
    let average = if months.is_empty() {
        0.0
    } else {
        total / months.len() as f64
    };

    MonthlyChart {
        months,
        total,
        average,
    }
}

/// A route handler for the monthly expense chart.
pub async fn get_monthly_chart(
    State(state): State<DashboardState>,
) -> Result<Json<MonthlyChart>, Error> {
    let snapshot = state.load_snapshot()?;

    Ok(Json(monthly_chart(&snapshot)))
}

// ============================================================================
// BUDGET CHART
// ============================================================================

/// One bar pair of the budget comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub budget_id: BudgetId,
    pub category: String,
    /// The budget's limit.
    pub budget: f64,
    /// How much was spent in the category during the month.
    pub actual: f64,
    pub percentage: Option<f64>,
    /// `percentage` capped at 150 for drawing.
    pub display_percentage: Option<f64>,
    pub status: BudgetStatus,
    /// The colour for the bar, decided by `status`.
    pub color: &'static str,
}

impl From<BudgetUsage> for BudgetComparison {
    fn from(usage: BudgetUsage) -> Self {
        Self {
            budget_id: usage.id,
            category: usage.category,
            budget: usage.amount,
            actual: usage.spent,
            percentage: usage.percentage,
            display_percentage: usage.percentage.map(display_percentage),
            status: usage.status,
            color: usage.status.color(),
        }
    }
}

/// Budgets against actual spending for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetChart {
    pub month: Month,
    /// Highest display percentage first.
    pub rows: Vec<BudgetComparison>,
    pub total_budget: f64,
    pub total_actual: f64,
    /// `None` when there are no budgets for the month.
    pub overall_percentage: Option<f64>,
}

/// Builds the budget comparison chart for `month`.
pub fn budget_chart(snapshot: &FinanceSnapshot, month: Month) -> BudgetChart {
    let mut rows: Vec<BudgetComparison> =
        budget_usage(&snapshot.transactions, &snapshot.budgets, month)
            .into_iter()
            .map(BudgetComparison::from)
            .collect();

    rows.sort_by(|a, b| {
        let a = a.display_percentage.unwrap_or(f64::NEG_INFINITY);
        let b = b.display_percentage.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });

    let total_budget = rows.iter().fold(0.0, |total, row| total + row.budget);
    let total_actual = rows.iter().fold(0.0, |total, row| total + row.actual);

    BudgetChart {
        month,
        rows,
        total_budget,
        total_actual,
        overall_percentage: percentage_used(total_actual, total_budget),
    }
}

/// A route handler for the budget comparison chart.
///
/// Uses the current month in the local timezone unless `?month=YYYY-MM` is given.
pub async fn get_budget_chart(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<BudgetChart>, Error> {
    let Query(query) = query?;
    let month = query.month_or_current(&state.local_timezone)?;

    let snapshot = state.load_snapshot()?;

    Ok(Json(budget_chart(&snapshot, month)))
}
