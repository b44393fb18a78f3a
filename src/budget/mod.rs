//! Monthly spending limits per category.
//!
//! This module contains the `Budget` model, its database functions and the
//! route handlers for the budget REST endpoints. How much of a budget has been
//! used is worked out by the dashboard module from the stored transactions.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use core::{
    Budget, BudgetUpdate, NewBudget, create_budget, create_budget_table, delete_budget,
    get_budget, list_budgets, update_budget,
};
pub use create_endpoint::create_budget_endpoint;
pub use delete_endpoint::delete_budget_endpoint;
pub use edit_endpoint::edit_budget_endpoint;
pub use list_endpoint::{get_budget_endpoint, list_budgets_endpoint};
