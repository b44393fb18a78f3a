//! Defines the core data models and database queries for budgets.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::BudgetId,
    month::Month,
    validation::{non_empty, positive_amount},
};

// ============================================================================
// MODELS
// ============================================================================

/// A spending limit for one category in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The category name the limit applies to.
    pub category: String,
    /// The most that should be spent on `category` during `month`.
    pub amount: f64,
    /// The month the limit applies to.
    pub month: Month,
    /// When the budget was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated fields for creating a [Budget].
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    category: String,
    amount: f64,
    month: Month,
}

impl NewBudget {
    /// Validate the fields for a new budget.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyCategory] if `category` is empty,
    /// - or [Error::InvalidAmount] if `amount` is not a positive, finite number.
    pub fn new(category: &str, amount: f64, month: Month) -> Result<Self, Error> {
        Ok(Self {
            category: non_empty(category, Error::EmptyCategory)?,
            amount: positive_amount(amount)?,
            month,
        })
    }
}

/// A partial set of fields to merge into an existing [Budget].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BudgetUpdate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub month: Option<Month>,
}

impl BudgetUpdate {
    /// Apply the same field rules as [NewBudget::new] to the provided fields.
    ///
    /// # Errors
    /// Returns the first validation error found.
    pub fn validate(self) -> Result<Self, Error> {
        Ok(Self {
            category: self
                .category
                .map(|text| non_empty(&text, Error::EmptyCategory))
                .transpose()?,
            amount: self.amount.map(positive_amount).transpose()?,
            month: self.month,
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const BUDGET_COLUMNS: &str = "id, category, amount, month, created_at";

/// Create a new budget in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateBudget] if a budget already exists for the same category and month,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_budget(budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO budget (category, amount, month, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {BUDGET_COLUMNS}"
        ))?
        .query_row(
            (
                budget.category,
                budget.amount,
                budget.month,
                OffsetDateTime::now_utc(),
            ),
            map_budget_row,
        )
        .map_err(Error::from)
}

/// Retrieve a budget from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid budget,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_budget(id: BudgetId, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(&format!("SELECT {BUDGET_COLUMNS} FROM budget WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_budget_row)
        .map_err(Error::from)
}

/// Retrieve budgets ordered by month and then category.
///
/// If `month` is given, only the budgets for that month are returned.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn list_budgets(month: Option<Month>, connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budget
             WHERE ?1 IS NULL OR month = ?1
             ORDER BY month ASC, category ASC"
        ))?
        .query_map([month], map_budget_row)?
        .map(|maybe_budget| maybe_budget.map_err(Error::from))
        .collect()
}

/// Merge the fields set in `update` into the budget `id` and return the result.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingBudget] if `id` does not refer to a valid budget,
/// - [Error::DuplicateBudget] if the change would clash with another budget's category and month,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_budget(
    id: BudgetId,
    update: BudgetUpdate,
    connection: &Connection,
) -> Result<Budget, Error> {
    connection
        .prepare(&format!(
            "UPDATE budget
             SET category = COALESCE(?1, category),
                 amount = COALESCE(?2, amount),
                 month = COALESCE(?3, month)
             WHERE id = ?4
             RETURNING {BUDGET_COLUMNS}"
        ))?
        .query_row(
            (update.category, update.amount, update.month, id),
            map_budget_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingBudget,
            error => error.into(),
        })
}

/// Delete the budget `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingBudget] if `id` does not refer to a valid budget,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_budget(id: BudgetId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM budget WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBudget);
    }

    Ok(())
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            month TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(category, month)
        );

        CREATE INDEX IF NOT EXISTS idx_budget_month ON budget(month);",
    )
}

/// Map a database row to a Budget.
fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        created_at: row.get(4)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
