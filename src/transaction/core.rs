//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::TransactionId,
    validation::{non_empty, positive_amount},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category name, e.g. "Food". Any non-empty text is accepted.
    pub category: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated fields for creating a [Transaction].
///
/// The ID and creation time are assigned by [create_transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    amount: f64,
    date: Date,
    description: String,
    category: String,
    kind: TransactionType,
}

impl NewTransaction {
    /// Validate the fields for a new transaction.
    ///
    /// Text fields are trimmed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is not a positive, finite number,
    /// - [Error::EmptyDescription] if `description` is empty,
    /// - or [Error::EmptyCategory] if `category` is empty.
    pub fn new(
        amount: f64,
        date: Date,
        description: &str,
        category: &str,
        kind: TransactionType,
    ) -> Result<Self, Error> {
        Ok(Self {
            amount: positive_amount(amount)?,
            date,
            description: non_empty(description, Error::EmptyDescription)?,
            category: non_empty(category, Error::EmptyCategory)?,
            kind,
        })
    }
}

/// A partial set of fields to merge into an existing [Transaction].
///
/// Fields that are `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionType>,
}

impl TransactionUpdate {
    /// Apply the same field rules as [NewTransaction::new] to the provided fields.
    ///
    /// # Errors
    /// Returns the first validation error found.
    pub fn validate(self) -> Result<Self, Error> {
        Ok(Self {
            amount: self.amount.map(positive_amount).transpose()?,
            date: self.date,
            description: self
                .description
                .map(|text| non_empty(&text, Error::EmptyDescription))
                .transpose()?,
            category: self
                .category
                .map(|text| non_empty(&text, Error::EmptyCategory))
                .transpose()?,
            kind: self.kind,
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const TRANSACTION_COLUMNS: &str = "id, amount, date, description, category, kind, created_at";

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (amount, date, description, category, kind, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                transaction.amount,
                transaction.date,
                transaction.description,
                transaction.category,
                transaction.kind,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )
        .map_err(Error::from)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(Error::from)
}

/// Retrieve every transaction, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn list_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" ORDER BY created_at DESC, id DESC"
        ))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Merge the fields set in `update` into the transaction `id` and return the result.
///
/// The merge happens in a single statement, so a concurrent update to the
/// same transaction is either fully applied before or after this one.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "UPDATE \"transaction\"
             SET amount = COALESCE(?1, amount),
                 date = COALESCE(?2, date),
                 description = COALESCE(?3, description),
                 category = COALESCE(?4, category),
                 kind = COALESCE(?5, kind)
             WHERE id = ?6
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                update.amount,
                update.date,
                update.description,
                update.category,
                update.kind,
                id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
            error => error.into(),
        })
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at);",
    )
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        kind: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            NewTransaction, TransactionType, TransactionUpdate, create_transaction,
            delete_transaction, get_transaction, list_transactions, update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn lunch(amount: f64) -> NewTransaction {
        NewTransaction::new(
            amount,
            date!(2025 - 07 - 01),
            "Lunch",
            "Food",
            TransactionType::Expense,
        )
        .unwrap()
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let transaction = create_transaction(lunch(12.3), &conn).unwrap();

        assert!(transaction.id > 0);
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.date, date!(2025 - 07 - 01));
        assert_eq!(transaction.description, "Lunch");
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.kind, TransactionType::Expense);
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let created = create_transaction(lunch(5.0), &conn).unwrap();

        let got = get_transaction(created.id, &conn).unwrap();

        assert_eq!(got, created);
    }

    #[test]
    fn get_fails_on_missing_id() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn list_returns_newest_first() {
        let conn = get_test_connection();
        let first = create_transaction(lunch(1.0), &conn).unwrap();
        let second = create_transaction(lunch(2.0), &conn).unwrap();
        let third = create_transaction(lunch(3.0), &conn).unwrap();

        let got: Vec<_> = list_transactions(&conn)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(got, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn update_changes_only_provided_fields() {
        let conn = get_test_connection();
        let created = create_transaction(lunch(50.0), &conn).unwrap();

        let updated = update_transaction(
            created.id,
            TransactionUpdate {
                amount: Some(60.0),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(updated.amount, 60.0);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.kind, created.kind);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_fails_on_missing_id() {
        let conn = get_test_connection();

        let result = update_transaction(
            99,
            TransactionUpdate {
                amount: Some(1.0),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction_from_list() {
        let conn = get_test_connection();
        let keep = create_transaction(lunch(1.0), &conn).unwrap();
        let remove = create_transaction(lunch(2.0), &conn).unwrap();

        delete_transaction(remove.id, &conn).unwrap();

        let remaining = list_transactions(&conn).unwrap();
        assert_eq!(remaining, vec![keep]);
    }

    #[test]
    fn delete_fails_on_missing_id() {
        let conn = get_test_connection();

        assert_eq!(
            delete_transaction(7, &conn),
            Err(Error::DeleteMissingTransaction)
        );
    }
}
