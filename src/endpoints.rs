//! The REST API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/budgets/{budget_id}', use [format_endpoint].

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to read, update and delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to read, update and delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The monthly dashboard summary.
pub const DASHBOARD: &str = "/api/dashboard";
/// Expenses grouped by category, for a pie chart.
pub const CATEGORY_CHART: &str = "/api/charts/categories";
/// Expenses per month, for a bar chart.
pub const MONTHLY_CHART: &str = "/api/charts/monthly";
/// Budgets against actual spending.
pub const BUDGET_CHART: &str = "/api/charts/budgets";
/// The known categories and their colours.
pub const CATEGORIES: &str = "/api/categories";
/// Liveness check.
pub const HEALTH: &str = "/api/health";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is the text from a left brace up to and including the next
/// right brace, e.g. '{budget_id}' in '/api/budgets/{budget_id}'. Only the
/// first parameter is replaced. If there is no closing brace, everything
/// after the left brace is replaced.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| start + offset + 1);

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}
