//! Dashboard module
//!
//! Read-only views computed from a snapshot of all transactions and budgets:
//! the dashboard summary, chart series and budget-vs-actual comparisons.

mod aggregation;
mod budget_status;
mod charts;
mod handlers;
mod snapshot;

pub use charts::{get_budget_chart, get_category_chart, get_monthly_chart};
pub use handlers::get_dashboard;
