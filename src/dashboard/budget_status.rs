//! Classifies how much of a budget has been spent.

use serde::Serialize;

use crate::{
    budget::Budget, category::category_color, dashboard::aggregation::spent_in_category,
    database_id::BudgetId, month::Month, transaction::Transaction,
};

/// Spending above this percentage of the limit is on track to run out.
pub const ON_TRACK_THRESHOLD: f64 = 80.0;

/// Spending above this percentage of the limit is over budget.
pub const OVER_THRESHOLD: f64 = 100.0;

/// The largest percentage drawn by the budget comparison chart.
pub const DISPLAY_PERCENTAGE_CAP: f64 = 150.0;

/// How spending compares to a budget's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    /// At most 80% of the limit has been spent.
    Under,
    /// More than 80% and at most 100% of the limit has been spent.
    OnTrack,
    /// More than the limit has been spent.
    Over,
}

impl BudgetStatus {
    /// The colour used to draw bars with this status.
    pub fn color(self) -> &'static str {
        match self {
            BudgetStatus::Under => "#10B981",
            BudgetStatus::OnTrack => "#F59E0B",
            BudgetStatus::Over => "#EF4444",
        }
    }
}

/// `spent` as a percentage of `limit`, or `None` if `limit` is not positive.
pub fn percentage_used(spent: f64, limit: f64) -> Option<f64> {
    (limit > 0.0).then(|| spent * 100.0 / limit)
}

/// Classify spending against a limit.
///
/// A non-positive limit is over budget as soon as anything is spent.
pub fn classify(spent: f64, limit: f64) -> BudgetStatus {
    match percentage_used(spent, limit) {
        Some(percentage) if percentage > OVER_THRESHOLD => BudgetStatus::Over,
        Some(percentage) if percentage > ON_TRACK_THRESHOLD => BudgetStatus::OnTrack,
        Some(_) => BudgetStatus::Under,
        None if spent > 0.0 => BudgetStatus::Over,
        None => BudgetStatus::Under,
    }
}

/// Clamp a percentage for drawing. Classification always uses the raw value.
pub fn display_percentage(percentage: f64) -> f64 {
    percentage.min(DISPLAY_PERCENTAGE_CAP)
}

/// One budget together with how much of it has been spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub id: BudgetId,
    pub category: String,
    pub month: Month,
    /// The budget's limit.
    pub amount: f64,
    pub spent: f64,
    /// Unclamped, `None` when the limit is not positive.
    pub percentage: Option<f64>,
    pub status: BudgetStatus,
    /// The category's colour.
    pub color: &'static str,
}

impl BudgetUsage {
    fn new(budget: &Budget, spent: f64) -> Self {
        Self {
            id: budget.id,
            category: budget.category.clone(),
            month: budget.month,
            amount: budget.amount,
            spent,
            percentage: percentage_used(spent, budget.amount),
            status: classify(spent, budget.amount),
            color: category_color(&budget.category),
        }
    }
}

/// Work out the usage of every budget for `month`, in the order of `budgets`.
pub fn budget_usage(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: Month,
) -> Vec<BudgetUsage> {
    budgets
        .iter()
        .filter(|budget| budget.month == month)
        .map(|budget| {
            let spent = spent_in_category(transactions, &budget.category, month);
            BudgetUsage::new(budget, spent)
        })
        .collect()
}
